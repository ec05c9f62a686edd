//! Asteroid Overlay - bouncing, rotating sprites over a live video feed
//!
//! Core modules:
//! - `sim`: Deterministic simulation (targets, spawning, collisions)
//! - `raster`: Software pixel buffers, rotation and alpha compositing
//! - `driver`: Frame loop over external capture/display/input collaborators
//! - `settings`: Run configuration

pub mod driver;
pub mod error;
pub mod raster;
pub mod settings;
pub mod sim;

pub use driver::{DisplaySink, ExitPoll, FrameSource, Overlay, RunSummary};
pub use error::{OverlayError, Result};
pub use settings::{CaptureFailurePolicy, Settings};

/// Simulation constants
pub mod consts {
    /// Lower bound of the per-target speed draw (pixels per tick, inclusive)
    pub const SPEED_MIN: f32 = 5.0;
    /// Upper bound of the per-target speed draw (exclusive)
    pub const SPEED_MAX: f32 = 15.0;

    /// Asteroid pool size
    pub const ASTEROID_COUNT: usize = 10;
    /// Asteroid spin (degrees per tick)
    pub const ASTEROID_DELTA_ANGLE: f32 = 15.0;
    /// Starting orientation of every spawned target
    pub const START_ANGLE: f32 = 0.0;

    /// Width frames are resized to before drawing
    pub const DISPLAY_WIDTH: u32 = 640;

    /// Center marker defaults
    pub const MARKER_RADIUS: i32 = 5;
    pub const MARKER_COLOR: [u8; 3] = [0, 255, 0];
    /// Largest marker radius accepted from settings
    pub const MAX_MARKER_RADIUS: i32 = 64;
}

/// Bring a heading back into [0, 2π) after a one-shot reflection.
///
/// Reflections move a heading by less than a full turn, so a single
/// correction in either direction is enough.
#[inline]
pub fn normalize_heading(mut heading: f32) -> f32 {
    use std::f32::consts::TAU;
    if heading < 0.0 {
        heading += TAU;
    }
    if heading >= TAU {
        heading -= TAU;
    }
    heading
}

/// Wrap a rotation angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_normalize_heading() {
        assert!((normalize_heading(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-5);
        assert!((normalize_heading(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert_eq!(normalize_heading(TAU), 0.0);
        assert_eq!(normalize_heading(1.0), 1.0);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(375.0), 15.0);
        assert_eq!(wrap_degrees(-15.0), 345.0);
        assert_eq!(wrap_degrees(0.0), 0.0);
    }
}
