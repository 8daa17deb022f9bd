//! Generate a sphere fly-through scene as a Blender script.
//!
//! Usage: `flyby [--data FILE] [--background IMG] [--out FILE] [--seed N] [--dry-run]`

mod bpy;

use anyhow::Context;
use clap::Parser;
use flyby_core::{
    Dataset, FlybyConfig, RecordingHost, SceneAssembler, SceneCommand, TimelineParams,
    FRAME_MOVE, FRAME_PAUSE, SCALE_FACTOR,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flyby")]
#[command(about = "Lay out labeled spheres by value and animate a camera past them")]
struct Args {
    /// Dataset file with one `name = value` entry per line (built-in sample if omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Image mapped onto a plane behind the spheres
    #[arg(long)]
    background: Option<PathBuf>,

    /// Where to write the generated script (stdout if omitted)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Radius of the sphere with the largest value
    #[arg(long, default_value_t = SCALE_FACTOR)]
    scale_factor: f32,

    /// Frames the camera holds on each sphere
    #[arg(long, default_value_t = FRAME_PAUSE, allow_hyphen_values = true)]
    pause: i32,

    /// Frames spent travelling between spheres
    #[arg(long = "move", default_value_t = FRAME_MOVE, allow_hyphen_values = true)]
    travel: i32,

    /// Base seed for sphere materials
    #[arg(long)]
    seed: Option<u64>,

    /// Unit appended to value labels
    #[arg(long)]
    suffix: Option<String>,

    /// Accept zero or negative values instead of rejecting them
    #[arg(long)]
    no_validate: bool,

    /// Print the planned scene instead of writing a script
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn config(&self) -> FlybyConfig {
        let defaults = FlybyConfig::default();
        FlybyConfig {
            scale_factor: self.scale_factor,
            validate: !self.no_validate,
            timeline: TimelineParams {
                pause_frames: self.pause,
                move_frames: self.travel,
                ..TimelineParams::default()
            },
            seed: self.seed.unwrap_or(defaults.seed),
            value_suffix: self.suffix.clone().unwrap_or(defaults.value_suffix),
            background: self.background.clone(),
        }
    }
}

fn load_dataset(path: Option<&PathBuf>) -> anyhow::Result<Dataset> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading dataset {}", path.display()))?;
            Dataset::parse(&text).with_context(|| format!("parsing dataset {}", path.display()))
        }
        None => {
            log::info!("no --data given; using the built-in sample dataset");
            Ok(Dataset::sample())
        }
    }
}

fn dry_run(assembler: &SceneAssembler, dataset: &Dataset) -> anyhow::Result<()> {
    let mut host = RecordingHost::new();
    if let Some(bg) = &assembler.config.background {
        let (w, h) = image::image_dimensions(bg)
            .with_context(|| format!("reading background image {}", bg.display()))?;
        host = host.with_image(bg, w, h);
    }
    let summary = assembler.assemble(dataset, &mut host)?;
    for p in &summary.placements {
        println!(
            "{:<24} value={:<10} r={:.3} x={:.3}",
            p.name(),
            p.scaled.item.value,
            p.radius(),
            p.position.x
        );
    }
    for key in &summary.timeline.keyframes {
        println!(
            "frame {:>5}  camera=({:.3}, {:.3}, {:.3})",
            key.frame, key.position.x, key.position.y, key.position.z
        );
    }
    let requests = host
        .commands
        .iter()
        .filter(|c| !matches!(c, SceneCommand::Clear))
        .count();
    println!(
        "{} host requests, frames {}..={}",
        requests,
        summary.timeline.frame_range().0,
        summary.timeline.total_frames
    );
    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    let dataset = load_dataset(args.data.as_ref())?;
    let assembler = SceneAssembler::new(args.config());

    if args.dry_run {
        return dry_run(&assembler, &dataset);
    }

    let mut host = bpy::BpyScriptHost::new();
    assembler
        .assemble(&dataset, &mut host)
        .context("building scene")?;
    let script = host.into_script();
    match &args.out {
        Some(path) => {
            fs::write(path, script).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{script}"),
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
