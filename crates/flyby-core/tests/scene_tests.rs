// Integration tests for scene assembly against the recording host.

use flyby_core::*;
use glam::Vec3;
use std::path::{Path, PathBuf};

fn abc() -> Dataset {
    Dataset::new(vec![
        Item::new("A", 10.0),
        Item::new("B", 20.0),
        Item::new("C", 5.0),
    ])
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

#[test]
fn builds_spheres_labels_camera_lights_and_animation() {
    let mut host = RecordingHost::new();
    let summary = SceneAssembler::new(FlybyConfig::default())
        .assemble(&abc(), &mut host)
        .unwrap();

    assert_eq!(host.commands.first(), Some(&SceneCommand::Clear));
    assert_eq!(host.commands.last(), Some(&SceneCommand::FrameRange(1, 145)));

    let spheres: Vec<_> = host.spheres().collect();
    assert_eq!(spheres.len(), 3);
    assert_eq!(spheres[1].name, "B");
    assert_eq!(spheres[1].position, Vec3::new(4.0, 0.0, 2.0));
    assert_eq!(spheres[1].scale, 2.0);
    assert_eq!(spheres[0].segments, SPHERE_SEGMENTS);

    let labels: Vec<_> = host.labels().collect();
    assert_eq!(labels.len(), 6);
    assert_eq!(labels[0].text, "A");
    assert_eq!(labels[1].text, "10 LoC");
    // A: radius 1, center z = 1.
    assert!(approx(labels[0].position, Vec3::new(0.0, 0.0, 2.35)));
    assert!(approx(labels[1].position, Vec3::new(0.0, 0.0, -0.3)));
    assert!(labels.iter().all(|l| l.emissive));
    assert_eq!(labels[2].size, 0.5);

    let camera = host.camera().unwrap();
    assert!(camera.active);
    assert!(approx(camera.position, Vec3::new(1.0, -10.0, 1.3)));

    let lights: Vec<_> = host.lights().collect();
    assert_eq!(lights.len(), 2);
    assert!(approx(lights[0].position, Vec3::new(-10.0, -10.0, 10.0)));
    assert!(lights[0].cast_shadows && !lights[1].cast_shadows);
    assert!(approx(lights[1].position, Vec3::new(1.0, -10.0, 2.6)));
    assert!(lights[0].energy > lights[1].energy);

    assert!(host.background().is_none());
    assert_eq!(host.timeline(), Some(&summary.timeline));
    assert_eq!(summary.extent, 8.5);
}

#[test]
fn background_plane_uses_image_aspect_and_extent() {
    let image = PathBuf::from("stars.jpg");
    let mut host = RecordingHost::new().with_image(&image, 2000, 1000);
    let config = FlybyConfig {
        background: Some(image.clone()),
        ..FlybyConfig::default()
    };
    SceneAssembler::new(config).assemble(&abc(), &mut host).unwrap();

    let bg = host.background().unwrap();
    // extent 8.5 -> width 21.25, height 10.625
    assert_eq!(bg.image, image);
    assert!(approx(bg.scale, Vec3::new(21.25, 10.625, 1.0)));
    assert!(approx(bg.position, Vec3::new(8.5, 25.5, 4.25)));
}

#[test]
fn missing_background_image_is_fatal() {
    let mut host = RecordingHost::new();
    let config = FlybyConfig {
        background: Some(PathBuf::from("missing.jpg")),
        ..FlybyConfig::default()
    };
    let err = SceneAssembler::new(config)
        .assemble(&abc(), &mut host)
        .unwrap_err();
    assert!(matches!(err, FlybyError::Host(_)));
    assert!(host.timeline().is_none());
}

#[test]
fn invalid_dataset_never_touches_the_host() {
    let mut host = RecordingHost::new();
    let assembler = SceneAssembler::new(FlybyConfig::default());

    let err = assembler.assemble(&Dataset::default(), &mut host).unwrap_err();
    assert!(matches!(err, FlybyError::EmptyDataset));

    let bad = Dataset::new(vec![Item::new("x", 3.0), Item::new("y", -1.0)]);
    let err = assembler.assemble(&bad, &mut host).unwrap_err();
    assert!(matches!(err, FlybyError::InvalidValue { .. }));
    assert!(host.commands.is_empty());
}

#[test]
fn single_item_scene_has_one_hold_and_no_background() {
    let image = Path::new("bg.png");
    let mut host = RecordingHost::new().with_image(image, 16, 9);
    let config = FlybyConfig {
        background: Some(image.to_path_buf()),
        ..FlybyConfig::default()
    };
    let summary = SceneAssembler::new(config)
        .assemble(&Dataset::new(vec![Item::new("solo", 7.0)]), &mut host)
        .unwrap();
    assert_eq!(summary.placements.len(), 1);
    assert_eq!(summary.timeline.keyframes.len(), 2);
    assert_eq!(summary.timeline.total_frames, 1 + FRAME_PAUSE);
    assert!(host.background().is_none());
}

#[test]
fn large_values_are_labeled_exactly() {
    let dataset = Dataset::parse("Big = 16777217\nSmall = 3\n").unwrap();
    let mut host = RecordingHost::new();
    SceneAssembler::new(FlybyConfig::default())
        .assemble(&dataset, &mut host)
        .unwrap();
    let texts: Vec<&str> = host.labels().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["Big", "16777217 LoC", "Small", "3 LoC"]);
}

#[test]
fn seed_controls_appearance() {
    let run = |seed| {
        let mut host = RecordingHost::new();
        let config = FlybyConfig {
            seed,
            ..FlybyConfig::default()
        };
        SceneAssembler::new(config).assemble(&abc(), &mut host).unwrap();
        host.spheres()
            .map(|s| s.appearance.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
    assert_ne!(run(5), run(6));
    let looks = run(5);
    assert_ne!(looks[0], looks[1]);
}

#[test]
fn sample_dataset_plans_cleanly() {
    let summary = SceneAssembler::new(FlybyConfig::default())
        .plan(&Dataset::sample())
        .unwrap();
    let n = SAMPLE_DATASET.len() as i32;
    assert_eq!(summary.placements.len(), SAMPLE_DATASET.len());
    assert_eq!(
        summary.timeline.total_frames,
        1 + (n - 1) * (FRAME_PAUSE + FRAME_MOVE) + FRAME_PAUSE
    );
    // The largest component is last and gets the full scale factor.
    assert_eq!(summary.placements.last().map(|p| p.radius()), Some(SCALE_FACTOR));
}
