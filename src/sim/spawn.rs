//! Target pools
//!
//! Start positions are uniform over the area where the whole sprite fits.
//! Overlapping starts are allowed.

use glam::IVec2;
use rand::Rng;

use super::target::Target;

/// Spawn `count` targets of `size` inside a `bounds` frame
pub fn create_targets<R: Rng + ?Sized>(
    bounds: IVec2,
    angle: f32,
    delta_angle: f32,
    size: IVec2,
    count: usize,
    rng: &mut R,
) -> Vec<Target> {
    // A sprite larger than the frame pins to the origin on that axis
    let max = (bounds - size).max(IVec2::ZERO);

    let mut targets = Vec::with_capacity(count);
    for _ in 0..count {
        let x = rng.random_range(0..=max.x);
        let y = rng.random_range(0..=max.y);
        targets.push(Target::new(
            IVec2::new(x, y),
            angle,
            delta_angle,
            bounds,
            size,
            rng,
        ));
    }

    log::debug!(
        "Spawned {} targets of {}x{} in {}x{}",
        count,
        size.x,
        size.y,
        bounds.x,
        bounds.y
    );
    targets
}
