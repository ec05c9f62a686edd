//! Sprite bitmaps: color plane plus a [0, 1] alpha mask

use glam::IVec2;

use super::frame::{Frame, Pixel};
use crate::error::{OverlayError, Result};

#[derive(Debug, Clone)]
pub struct Sprite {
    color: Frame,
    /// Row-major coverage, same size as `color`
    alpha: Vec<f32>,
}

impl Sprite {
    /// Build from a color raster and a matching alpha mask
    pub fn new(color: Frame, alpha: Vec<f32>) -> Result<Self> {
        let expected = (color.width() * color.height()) as usize;
        if alpha.len() != expected {
            return Err(OverlayError::BufferSize {
                expected,
                actual: alpha.len(),
            });
        }
        let alpha = alpha.into_iter().map(|a| a.clamp(0.0, 1.0)).collect();
        Ok(Self { color, alpha })
    }

    /// Split tightly packed RGBA bytes into color and alpha
    pub fn from_rgba(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = (width * height) as usize * 4;
        if bytes.len() != expected {
            return Err(OverlayError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }

        let mut pixels = Vec::with_capacity(expected / 4);
        let mut alpha = Vec::with_capacity(expected / 4);
        for px in bytes.chunks_exact(4) {
            pixels.push(Pixel::new(px[0], px[1], px[2]));
            alpha.push(px[3] as f32 / 255.0);
        }

        Ok(Self {
            color: Frame::from_pixels(width, height, pixels)?,
            alpha,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.color.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.color.height()
    }

    /// Size as a pixel vector (width, height)
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width() as i32, self.height() as i32)
    }

    pub fn color(&self) -> &Frame {
        &self.color
    }

    pub fn alpha(&self) -> &[f32] {
        &self.alpha
    }

    /// Coverage at (x, y) in un-rotated sprite coordinates
    #[inline]
    pub fn alpha_at(&self, x: u32, y: u32) -> f32 {
        self.alpha[(y * self.width() + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_splits_alpha() {
        let bytes = [10, 20, 30, 255, 40, 50, 60, 0];
        let sprite = Sprite::from_rgba(2, 1, &bytes).unwrap();
        assert_eq!(sprite.size(), IVec2::new(2, 1));
        assert_eq!(sprite.color().get(1, 0), Some(Pixel::new(40, 50, 60)));
        assert_eq!(sprite.alpha_at(0, 0), 1.0);
        assert_eq!(sprite.alpha_at(1, 0), 0.0);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        assert!(Sprite::from_rgba(2, 2, &[0; 15]).is_err());
        let color = Frame::filled(2, 2, Pixel::BLACK);
        assert!(Sprite::new(color, vec![1.0; 3]).is_err());
    }

    #[test]
    fn test_alpha_is_clamped() {
        let color = Frame::filled(2, 1, Pixel::BLACK);
        let sprite = Sprite::new(color, vec![-0.5, 3.0]).unwrap();
        assert_eq!(sprite.alpha(), &[0.0, 1.0]);
    }
}
