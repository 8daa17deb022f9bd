//! Scene assembly: sizing, layout and timeline generation, then the host
//! requests that turn them into a scene.

use crate::appearance::{item_seed, NoiseAppearance};
use crate::config::FlybyConfig;
use crate::constants::{
    BACKGROUND_DEPTH_RATIO, BACKGROUND_INSET, BACKGROUND_WIDTH_RATIO, FILL_LIGHT_ENERGY,
    KEY_LIGHT_ENERGY, KEY_LIGHT_OFFSET_RADII, LABEL_SIZE_RATIO, NAME_LABEL_OFFSET, SPHERE_RINGS,
    SPHERE_SEGMENTS, VALUE_LABEL_OFFSET,
};
use crate::dataset::{map_sizes, Dataset};
use crate::error::{FlybyError, Result};
use crate::host::{
    BackgroundRequest, CameraRequest, LabelRequest, LightKind, LightRequest, SceneHost,
    SphereRequest,
};
use crate::layout::{extent, layout, Placement};
use crate::timeline::{framing_position, generate_with, Timeline};
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

// Text and the camera face +Y after a quarter turn about X.
const UPRIGHT: Vec3 = Vec3::new(FRAC_PI_2, 0.0, 0.0);

/// What a successful run produced, for logging and inspection.
#[derive(Clone, Debug)]
pub struct SceneSummary {
    pub placements: Vec<Placement>,
    pub timeline: Timeline,
    /// X coordinate of the last sphere.
    pub extent: f32,
}

/// Lays out the dataset, then builds the scene through a [`SceneHost`].
pub struct SceneAssembler {
    pub config: FlybyConfig,
}

impl SceneAssembler {
    pub fn new(config: FlybyConfig) -> Self {
        Self { config }
    }

    /// Run the pure stages only: sizes, placements and timeline.
    pub fn plan(&self, dataset: &Dataset) -> Result<SceneSummary> {
        let scaled = map_sizes(&dataset.items, self.config.map_options())?;
        let placements = layout(&scaled);
        let timeline = generate_with(&placements, self.config.timeline)?;
        let extent = extent(&placements);
        Ok(SceneSummary {
            placements,
            timeline,
            extent,
        })
    }

    /// Build the full scene. The plan is computed before the first host call,
    /// so invalid input leaves the host untouched.
    pub fn assemble<H: SceneHost + ?Sized>(
        &self,
        dataset: &Dataset,
        host: &mut H,
    ) -> Result<SceneSummary> {
        let summary = self.plan(dataset)?;
        let first = summary
            .placements
            .first()
            .ok_or(FlybyError::EmptyTimeline)?;

        host.clear().map_err(FlybyError::Host)?;
        for (i, placement) in summary.placements.iter().enumerate() {
            self.add_item(host, i, placement)?;
        }

        let camera = camera_request(first);
        host.add_camera(&camera).map_err(FlybyError::Host)?;
        for light in light_rig(first, &camera) {
            host.add_light(&light).map_err(FlybyError::Host)?;
        }

        if let Some(image) = self.config.background.as_deref() {
            add_background(host, image, summary.extent)?;
        }

        host.animate_camera(&summary.timeline).map_err(FlybyError::Host)?;
        let (start, end) = summary.timeline.frame_range();
        host.set_frame_range(start, end).map_err(FlybyError::Host)?;

        log::info!(
            "[scene] {} spheres over x=0..{:.2}, {} keyframes, frames {}..={}",
            summary.placements.len(),
            summary.extent,
            summary.timeline.keyframes.len(),
            start,
            end
        );
        Ok(summary)
    }

    fn add_item<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        index: usize,
        placement: &Placement,
    ) -> Result<()> {
        let r = placement.radius();
        let center = placement.position;
        host.add_sphere(&SphereRequest {
            name: placement.name().to_string(),
            position: center,
            scale: r,
            segments: SPHERE_SEGMENTS,
            rings: SPHERE_RINGS,
            appearance: NoiseAppearance::from_seed(item_seed(self.config.seed, index)),
        })
        .map_err(FlybyError::Host)?;

        let label = |text: String, dz: f32| LabelRequest {
            text,
            position: center + Vec3::Z * dz,
            size: r * LABEL_SIZE_RATIO,
            rotation: UPRIGHT,
            emissive: true,
        };
        host.add_label(&label(placement.name().to_string(), r * NAME_LABEL_OFFSET))
            .map_err(FlybyError::Host)?;
        let value_text = format_value(placement.scaled.item.value, &self.config.value_suffix);
        host.add_label(&label(value_text, -r * VALUE_LABEL_OFFSET))
            .map_err(FlybyError::Host)?;
        Ok(())
    }
}

/// `2301` with suffix `LoC` becomes `"2301 LoC"`; an empty suffix leaves the
/// bare number.
pub fn format_value(value: f64, suffix: &str) -> String {
    if suffix.is_empty() {
        value.to_string()
    } else {
        format!("{value} {suffix}")
    }
}

/// Starting camera: the first sphere's framing, nudged one radius along +X.
fn camera_request(first: &Placement) -> CameraRequest {
    CameraRequest {
        position: framing_position(first) + Vec3::X * first.radius(),
        rotation: UPRIGHT,
        active: true,
    }
}

/// Strong key light behind-left of the first sphere and a weak shadowless
/// fill above the camera.
fn light_rig(first: &Placement, camera: &CameraRequest) -> [LightRequest; 2] {
    let r = first.radius() * KEY_LIGHT_OFFSET_RADII;
    let key = LightRequest {
        kind: LightKind::Sun,
        position: Vec3::new(-r, -r, r),
        rotation: Vec3::new(0.0, (-45.0_f32).to_radians(), 15.0_f32.to_radians()),
        energy: KEY_LIGHT_ENERGY,
        cast_shadows: true,
    };
    let fill = LightRequest {
        kind: LightKind::Sun,
        position: camera.position * Vec3::new(1.0, 1.0, 2.0),
        rotation: Vec3::new(75.0_f32.to_radians(), 0.0, (-15.0_f32).to_radians()),
        energy: FILL_LIGHT_ENERGY,
        cast_shadows: false,
    };
    [key, fill]
}

fn add_background<H: SceneHost + ?Sized>(host: &mut H, image: &Path, extent: f32) -> Result<()> {
    if extent <= 0.0 {
        log::warn!("[scene] layout has no extent; skipping background plane");
        return Ok(());
    }
    let (w_px, h_px) = host.image_size(image).map_err(FlybyError::Host)?;
    if w_px == 0 || h_px == 0 {
        return Err(FlybyError::Host(anyhow::anyhow!(
            "background image {} has zero size",
            image.display()
        )));
    }
    let aspect = w_px as f32 / h_px as f32;
    let width = extent * BACKGROUND_WIDTH_RATIO;
    let height = width / aspect;
    host.add_background(&BackgroundRequest {
        image: image.to_path_buf(),
        position: Vec3::new(
            width / 2.0 - width * BACKGROUND_INSET,
            extent * BACKGROUND_DEPTH_RATIO,
            height / 2.0 - height * BACKGROUND_INSET,
        ),
        rotation: Vec3::new(-FRAC_PI_2, 0.0, 0.0),
        scale: Vec3::new(width, height, 1.0),
    })
    .map_err(FlybyError::Host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_labels_drop_trailing_zero() {
        assert_eq!(format_value(2301.0, "LoC"), "2301 LoC");
        assert_eq!(format_value(2.5, ""), "2.5");
    }
}
