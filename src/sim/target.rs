//! Target entity: a bouncing, spinning sprite instance
//!
//! Positions are integer pixels with the origin at the top-left of the frame
//! and Y growing downward. Headings are radians measured counter-clockwise
//! from +X as seen on screen, so vertical displacement is negated.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::IVec2;
use rand::Rng;

use crate::consts::{SPEED_MAX, SPEED_MIN};
use crate::{normalize_heading, wrap_degrees};

/// Read-only snapshot handed to the compositor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDimensions {
    /// Top-left corner
    pub pos: IVec2,
    /// Rotation (degrees)
    pub angle: f32,
    /// Sprite size
    pub size: IVec2,
    /// Center distance from the frame origin
    pub r: f32,
}

/// A moving, rotating sprite instance
#[derive(Debug, Clone)]
pub struct Target {
    /// Top-left corner (pixels)
    pub pos: IVec2,
    /// Sprite size, fixed at creation
    pub size: IVec2,
    /// Frame size the target bounces inside
    pub bounds: IVec2,
    /// Pixel center, refreshed by `update`
    pub center: IVec2,
    /// Distance of `center` from the origin (informational)
    pub r: f32,
    /// Pixels per tick
    pub speed: f32,
    /// Direction of travel (radians, [0, 2π))
    pub heading: f32,
    /// Visual rotation (degrees, [0, 360))
    pub angle: f32,
    /// Rotation added every tick
    pub delta_angle: f32,
    /// Inactive targets are neither drawn, updated nor collided
    pub active: bool,
}

impl Target {
    /// Create a target at `pos`, drawing its speed and heading from `rng`
    pub fn new<R: Rng + ?Sized>(
        pos: IVec2,
        angle: f32,
        delta_angle: f32,
        bounds: IVec2,
        size: IVec2,
        rng: &mut R,
    ) -> Self {
        let speed = rng.random_range(SPEED_MIN..SPEED_MAX);
        let heading = rng.random_range(0.0..TAU);
        Self {
            pos,
            size,
            bounds,
            center: IVec2::ZERO,
            r: 0.0,
            speed,
            heading,
            angle: wrap_degrees(angle),
            delta_angle,
            active: true,
        }
    }

    pub fn dimensions(&self) -> TargetDimensions {
        TargetDimensions {
            pos: self.pos,
            angle: self.angle,
            size: self.size,
            r: self.r,
        }
    }

    /// Current heading (radians)
    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Recompute and return the pixel center
    pub fn center_origin(&mut self) -> IVec2 {
        self.center = self.pos + self.size / 2;
        self.center
    }

    /// Recompute and return the center's distance from the origin
    pub fn distance_from_origin(&mut self) -> f32 {
        self.r = self.center.as_vec2().length();
        self.r
    }

    /// Exchange speed and heading with another target
    pub fn swap_velocity(&mut self, other: &mut Target) {
        std::mem::swap(&mut self.speed, &mut other.speed);
        std::mem::swap(&mut self.heading, &mut other.heading);
    }

    /// Advance one tick: translate, bounce, spin
    pub fn update(&mut self) {
        // Whole-pixel steps, truncated toward zero
        let dx = (self.speed * self.heading.cos()) as i32;
        let dy = (self.speed * self.heading.sin()) as i32;
        self.pos.x += dx;
        self.pos.y -= dy;

        self.center_origin();
        self.distance_from_origin();

        self.reflect();
        self.heading = normalize_heading(self.heading);

        self.angle = wrap_degrees(self.angle + self.delta_angle);
    }

    /// Turn the heading back into the frame at each edge it has reached.
    ///
    /// Edges are checked top, bottom, left, right; at a corner two rules
    /// fire in sequence. Position is never clamped.
    fn reflect(&mut self) {
        let max = self.bounds - self.size;
        let a = &mut self.heading;

        if self.pos.y <= 0 {
            if within(*a, 0.0, FRAC_PI_2) {
                *a = TAU - *a;
            }
            if within(*a, FRAC_PI_2, PI) {
                *a = TAU - *a;
            }
        }
        if self.pos.y >= max.y {
            if within(*a, PI, 3.0 * FRAC_PI_2) {
                *a = TAU - *a;
            }
            if within(*a, 3.0 * FRAC_PI_2, TAU) {
                *a = TAU - *a;
            }
        }
        if self.pos.x <= 0 {
            if within(*a, PI, 3.0 * FRAC_PI_2) {
                *a = PI - *a;
            }
            if within(*a, FRAC_PI_2, PI) {
                *a = PI - *a;
            }
        }
        if self.pos.x >= max.x {
            if within(*a, 0.0, FRAC_PI_2) {
                *a = 3.0 * PI - *a;
            }
            if within(*a, 3.0 * FRAC_PI_2, TAU) {
                *a = PI - *a;
            }
        }
    }
}

/// Open interval test
#[inline]
fn within(value: f32, lo: f32, hi: f32) -> bool {
    value > lo && value < hi
}
