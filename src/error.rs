//! Error types for the overlay
//!
//! Simulation and compositing are total; only the frame loop edges and
//! configuration loading can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    /// The capture device produced no frame before the loop started
    #[error("capture device returned no initial frame")]
    FirstFrameUnavailable,

    /// Capture failed mid-run under the `Terminate` policy
    #[error("capture failed at tick {tick}")]
    CaptureLost { tick: u64 },

    /// Raw pixel data does not match the declared raster size
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("cannot read settings: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, OverlayError>;
