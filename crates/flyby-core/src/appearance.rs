//! Seeded sphere appearance.
//!
//! Each sphere gets a procedural noise material whose parameters are drawn
//! from a seeded RNG, so a fixed seed reproduces the same scene.

use crate::constants::{NOISE_DETAIL_RANGE, NOISE_ROUGHNESS_RANGE, NOISE_SCALE_RANGE};
use glam::Vec4;
use rand::prelude::*;

/// Parameters of a noise texture fed through a two-stop color ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseAppearance {
    pub noise_scale: f32,
    pub detail: f32,
    pub roughness: f32,
    /// RGBA ramp stops; alpha is always 1.
    pub ramp: [Vec4; 2],
}

impl NoiseAppearance {
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise_scale = rng.gen_range(NOISE_SCALE_RANGE.0..NOISE_SCALE_RANGE.1);
        let detail = rng.gen_range(NOISE_DETAIL_RANGE.0..NOISE_DETAIL_RANGE.1);
        let roughness = rng.gen_range(NOISE_ROUGHNESS_RANGE.0..NOISE_ROUGHNESS_RANGE.1);
        let mut stop = || Vec4::new(rng.gen(), rng.gen(), rng.gen(), 1.0);
        let ramp = [stop(), stop()];
        Self {
            noise_scale,
            detail,
            roughness,
            ramp,
        }
    }
}

/// Derive the seed for item `index` from the run's base seed.
#[inline]
pub fn item_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
