//! Camera fly-through timeline: hold on each sphere, then travel to the next.
//!
//! The generator only produces keyframes; the host's animation system does the
//! in-between interpolation. [`Timeline::sample`] mirrors that interpolation so
//! previews and tests can inspect the motion without a host.

use crate::constants::{
    CAMERA_DISTANCE_RADII, CAMERA_HEIGHT_RADII, DEFAULT_START_FRAME, FRAME_MOVE, FRAME_PAUSE,
};
use crate::error::{FlybyError, Result};
use crate::layout::Placement;
use glam::Vec3;

/// How the host should interpolate between consecutive keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Hold the previous value until the next keyframe.
    Constant,
    Linear,
    /// Eased in and out; holds decelerate and accelerate softly.
    #[default]
    Bezier,
}

impl Interpolation {
    /// Remap a normalized segment parameter `t` in `[0, 1]`.
    #[inline]
    pub fn ease(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Interpolation::Constant => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Interpolation::Linear => t,
            Interpolation::Bezier => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraKeyframe {
    pub frame: i32,
    pub position: Vec3,
}

/// Ordered camera keyframes plus the interpolation applied to all of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub keyframes: Vec<CameraKeyframe>,
    /// Frame of the last keyframe.
    pub total_frames: i32,
    pub interpolation: Interpolation,
}

impl Timeline {
    /// First and last frame covered by the animation.
    pub fn frame_range(&self) -> (i32, i32) {
        let start = self.keyframes.first().map_or(0, |k| k.frame);
        (start, self.total_frames)
    }

    /// Camera position at `frame`, clamped to the first/last keyframe outside
    /// the animated range.
    pub fn sample(&self, frame: f32) -> Vec3 {
        let (first, last) = match (self.keyframes.first(), self.keyframes.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Vec3::ZERO,
        };
        if frame <= first.frame as f32 {
            return first.position;
        }
        if frame >= last.frame as f32 {
            return last.position;
        }
        // Index of the first keyframe strictly after `frame`.
        let next = self
            .keyframes
            .partition_point(|k| (k.frame as f32) <= frame);
        let a = &self.keyframes[next - 1];
        let b = &self.keyframes[next];
        let span = b.frame as f32 - a.frame as f32;
        if span <= 0.0 {
            return b.position;
        }
        let t = self.interpolation.ease((frame - a.frame as f32) / span);
        a.position.lerp(b.position, t)
    }
}

/// Parameters for [`generate_with`].
///
/// - `pause_frames`: hold duration per sphere
/// - `move_frames`: travel duration between consecutive spheres
/// - `start_frame`: frame of the very first keyframe
/// - `interpolation`: policy applied uniformly to every keyframe
#[derive(Clone, Copy, Debug)]
pub struct TimelineParams {
    pub pause_frames: i32,
    pub move_frames: i32,
    pub start_frame: i32,
    pub interpolation: Interpolation,
}

impl Default for TimelineParams {
    fn default() -> Self {
        Self {
            pause_frames: FRAME_PAUSE,
            move_frames: FRAME_MOVE,
            start_frame: DEFAULT_START_FRAME,
            interpolation: Interpolation::default(),
        }
    }
}

/// Where the camera sits while framing `placement`: in front of it (-Y) and
/// slightly above its center, both proportional to the radius.
#[inline]
pub fn framing_position(placement: &Placement) -> Vec3 {
    let r = placement.radius();
    Vec3::new(
        placement.position.x,
        -r * CAMERA_DISTANCE_RADII,
        r * CAMERA_HEIGHT_RADII,
    )
}

/// Build the fly-through with the default start frame and eased interpolation.
pub fn generate(
    placements: &[Placement],
    pause_frames: i32,
    move_frames: i32,
) -> Result<Timeline> {
    generate_with(
        placements,
        TimelineParams {
            pause_frames,
            move_frames,
            ..TimelineParams::default()
        },
    )
}

/// Emit two keyframes per placement (start and end of its hold), advancing by
/// `move_frames` between placements. No travel phase follows the last one.
///
/// Negative phase lengths are clamped to zero. A timeline whose last frame
/// does not fit in `i32` fails with [`FlybyError::FrameOverflow`].
pub fn generate_with(placements: &[Placement], params: TimelineParams) -> Result<Timeline> {
    if placements.is_empty() {
        return Err(FlybyError::EmptyTimeline);
    }
    let pause = clamp_phase("pause", params.pause_frames);
    let travel = clamp_phase("move", params.move_frames);

    let mut keyframes = Vec::with_capacity(placements.len() * 2);
    let advance = |frame: i32, by: i32| frame.checked_add(by).ok_or(FlybyError::FrameOverflow);
    let mut frame = params.start_frame;
    for (i, placement) in placements.iter().enumerate() {
        if i > 0 {
            frame = advance(frame, travel)?;
        }
        let position = framing_position(placement);
        keyframes.push(CameraKeyframe { frame, position });
        frame = advance(frame, pause)?;
        keyframes.push(CameraKeyframe { frame, position });
    }

    log::debug!(
        "[timeline] {} keyframes, frames {}..={}",
        keyframes.len(),
        params.start_frame,
        frame
    );
    Ok(Timeline {
        keyframes,
        total_frames: frame,
        interpolation: params.interpolation,
    })
}

fn clamp_phase(label: &str, frames: i32) -> i32 {
    if frames < 0 {
        log::warn!("[timeline] {label} phase of {frames} frames clamped to 0");
        0
    } else {
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Item, ScaledItem};

    fn placement(x: f32, r: f32) -> Placement {
        Placement {
            scaled: ScaledItem {
                item: Item::new("p", f64::from(r)),
                scale: r,
            },
            position: Vec3::new(x, 0.0, r),
        }
    }

    #[test]
    fn ease_hits_endpoints() {
        for mode in [
            Interpolation::Constant,
            Interpolation::Linear,
            Interpolation::Bezier,
        ] {
            assert_eq!(mode.ease(0.0), 0.0);
            assert_eq!(mode.ease(1.0), 1.0);
        }
        assert_eq!(Interpolation::Bezier.ease(0.5), 0.5);
        assert!(Interpolation::Bezier.ease(0.1) < 0.1);
        assert!(Interpolation::Bezier.ease(0.9) > 0.9);
    }

    #[test]
    fn negative_phases_are_clamped() {
        let ps = [placement(0.0, 1.0), placement(4.0, 2.0)];
        let tl = generate_with(
            &ps,
            TimelineParams {
                pause_frames: -5,
                move_frames: -3,
                start_frame: 10,
                interpolation: Interpolation::Linear,
            },
        )
        .unwrap();
        assert!(tl.keyframes.iter().all(|k| k.frame == 10));
        assert_eq!(tl.total_frames, 10);
    }

    #[test]
    fn huge_phases_overflow_into_an_error() {
        let ps = [placement(0.0, 1.0), placement(4.0, 2.0)];
        assert!(matches!(
            generate(&ps, i32::MAX, 36),
            Err(FlybyError::FrameOverflow)
        ));
        assert!(matches!(
            generate(&ps, 24, i32::MAX - 10),
            Err(FlybyError::FrameOverflow)
        ));
        // The largest timeline that still fits is accepted.
        let tl = generate_with(
            &ps,
            TimelineParams {
                pause_frames: 10,
                move_frames: i32::MAX - 20,
                start_frame: 0,
                interpolation: Interpolation::Bezier,
            },
        )
        .unwrap();
        assert_eq!(tl.total_frames, i32::MAX);
    }

    #[test]
    fn sample_holds_then_travels() {
        let ps = [placement(0.0, 1.0), placement(4.0, 1.0)];
        let tl = generate(&ps, 10, 20).unwrap();
        // Hold: frames 1..=11 at the first framing.
        assert_eq!(tl.sample(1.0), tl.sample(11.0));
        assert_eq!(tl.sample(-100.0).x, 0.0);
        // Travel: 11..=31, halfway at 21.
        assert!((tl.sample(21.0).x - 2.0).abs() < 1e-5);
        assert_eq!(tl.sample(31.0).x, 4.0);
        assert_eq!(tl.sample(1000.0).x, 4.0);
    }

    #[test]
    fn constant_sampling_jumps_at_next_key() {
        let ps = [placement(0.0, 1.0), placement(4.0, 1.0)];
        let mut params = TimelineParams {
            pause_frames: 0,
            move_frames: 10,
            start_frame: 0,
            interpolation: Interpolation::Constant,
        };
        let tl = generate_with(&ps, params).unwrap();
        assert_eq!(tl.sample(9.5).x, 0.0);
        assert_eq!(tl.sample(10.0).x, 4.0);

        params.interpolation = Interpolation::Linear;
        let tl = generate_with(&ps, params).unwrap();
        assert!((tl.sample(5.0).x - 2.0).abs() < 1e-5);
    }
}
