//! Run settings
//!
//! Loaded from a JSON file; every field falls back to the reference run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DISPLAY_WIDTH, MARKER_COLOR, MARKER_RADIUS, MAX_MARKER_RADIUS};
use crate::error::{OverlayError, Result};

/// What the frame loop does when a capture fails after the first frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaptureFailurePolicy {
    /// Drop the tick: no simulation, no drawing, no present
    #[default]
    Skip,
    /// Try the capture again up to `attempts` more times, then skip
    Retry { attempts: u32 },
    /// Stop the loop with an error
    Terminate,
}

impl CaptureFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureFailurePolicy::Skip => "skip",
            CaptureFailurePolicy::Retry { .. } => "retry",
            CaptureFailurePolicy::Terminate => "terminate",
        }
    }

    /// Extra capture attempts allowed within one tick
    pub fn extra_attempts(&self) -> u32 {
        match self {
            CaptureFailurePolicy::Retry { attempts } => *attempts,
            _ => 0,
        }
    }
}

/// Overlay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Width every captured frame is resized to (aspect ratio kept)
    pub display_width: u32,
    /// Bounce inside the resized frame instead of the raw first capture
    pub bounds_from_display: bool,

    // === UFO pool (configurable) ===
    /// Number of UFO targets
    pub ufo_count: usize,
    /// UFO spin (degrees per tick)
    pub ufo_delta_angle: f32,

    /// RNG seed; `None` draws one at startup
    pub seed: Option<u64>,

    /// Mid-run capture failure handling
    pub capture_failure: CaptureFailurePolicy,

    // === Center marker ===
    pub marker_radius: i32,
    pub marker_color: [u8; 3],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_width: DISPLAY_WIDTH,
            bounds_from_display: false,

            ufo_count: 0,
            ufo_delta_angle: 0.0,

            seed: None,

            capture_failure: CaptureFailurePolicy::Skip,

            marker_radius: MARKER_RADIUS,
            marker_color: MARKER_COLOR,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the frame loop cannot draw with
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_MARKER_RADIUS).contains(&self.marker_radius) {
            return Err(OverlayError::InvalidSettings(format!(
                "marker_radius {} outside 0..={}",
                self.marker_radius, MAX_MARKER_RADIUS
            )));
        }
        if self.display_width == 0 {
            return Err(OverlayError::InvalidSettings(
                "display_width must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is absent
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let settings = Self::load(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Resolve the RNG seed, drawing one if none is configured
    pub fn resolve_seed(&self) -> u64 {
        use rand::Rng;
        self.seed.unwrap_or_else(|| rand::rng().random())
    }
}
