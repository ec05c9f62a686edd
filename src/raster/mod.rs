//! Software raster module
//!
//! CPU-side pixel buffers: frames, sprites, rotation and alpha blending.

pub mod compositor;
pub mod frame;
pub mod rotate;
pub mod sprite;

pub use compositor::{ClipRect, Marker, clip, draw_marker, draw_target, overlay_image_alpha};
pub use frame::{Frame, Pixel};
pub use rotate::rotate;
pub use sprite::Sprite;
