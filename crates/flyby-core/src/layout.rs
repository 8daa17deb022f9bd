//! Linear placement of sized spheres along the X axis.

use crate::dataset::ScaledItem;
use glam::Vec3;

/// Resolved position and size for one dataset entry.
///
/// `position.y` is always 0 and `position.z` equals the radius, so the sphere
/// rests on the ground plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub scaled: ScaledItem,
    pub position: Vec3,
}

impl Placement {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.scaled.scale
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.scaled.item.name
    }
}

/// Place items left to right starting at `x = 0`.
///
/// Each step advances by the previous radius twice plus the current radius:
/// `x_i = x_{i-1} + 2 * r_{i-1} + r_i`. Gaps therefore grow with the size of
/// the predecessor rather than closing to edge-to-edge contact; the look of
/// the fly-through depends on this rhythm.
pub fn layout(scaled_items: &[ScaledItem]) -> Vec<Placement> {
    let mut placements: Vec<Placement> = Vec::with_capacity(scaled_items.len());
    let mut x = 0.0_f32;
    for scaled in scaled_items {
        if let Some(prev) = placements.last() {
            let prev_radius = prev.radius();
            x += prev_radius + scaled.scale + prev_radius;
        }
        log::debug!(
            "[layout] {} r={:.3} at x={:.3}",
            scaled.item.name,
            scaled.scale,
            x
        );
        placements.push(Placement {
            position: Vec3::new(x, 0.0, scaled.scale),
            scaled: scaled.clone(),
        });
    }
    placements
}

/// X coordinate of the last placement, or 0 for an empty layout.
pub fn extent(placements: &[Placement]) -> f32 {
    placements.last().map_or(0.0, |p| p.position.x)
}
