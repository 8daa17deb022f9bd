use crate::constants::{DEFAULT_SEED, DEFAULT_VALUE_SUFFIX, SCALE_FACTOR};
use crate::dataset::MapOptions;
use crate::timeline::TimelineParams;
use std::path::PathBuf;

/// Run-wide tunables for one flyby generation.
///
/// Fields:
/// - `scale_factor`: radius of the sphere with the largest value
/// - `validate`: reject non-positive or non-finite values before layout
/// - `timeline`: hold/travel durations, start frame and interpolation
/// - `seed`: base seed for per-sphere appearance
/// - `value_suffix`: unit appended to the value label (`"2301 LoC"`)
/// - `background`: optional image mapped onto a plane behind the spheres
#[derive(Clone, Debug)]
pub struct FlybyConfig {
    pub scale_factor: f32,
    pub validate: bool,
    pub timeline: TimelineParams,
    pub seed: u64,
    pub value_suffix: String,
    pub background: Option<PathBuf>,
}

impl Default for FlybyConfig {
    fn default() -> Self {
        Self {
            scale_factor: SCALE_FACTOR,
            validate: true,
            timeline: TimelineParams::default(),
            seed: DEFAULT_SEED,
            value_suffix: DEFAULT_VALUE_SUFFIX.to_string(),
            background: None,
        }
    }
}

impl FlybyConfig {
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            scale_factor: self.scale_factor,
            validate: self.validate,
        }
    }
}
