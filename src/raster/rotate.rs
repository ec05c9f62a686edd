//! In-place-size rotation
//!
//! The output keeps the input's dimensions, so corners swung outside the
//! canvas are cropped and uncovered areas turn black. The alpha mask is not
//! rotated along with the color; callers blend with the upright mask.

use super::frame::{Border, Frame, Pixel, to_channel};

/// Rotate `src` counter-clockwise by `angle` degrees about `(w/2, h/2)`
pub fn rotate(src: &Frame, angle: f32) -> Frame {
    if angle.rem_euclid(360.0) == 0.0 {
        return src.clone();
    }

    let (w, h) = (src.width(), src.height());
    // Integer halves for the pivot
    let cx = (w / 2) as f32;
    let cy = (h / 2) as f32;
    let (sin, cos) = angle.to_radians().sin_cos();

    let mut pixels = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        let dy = y as f32 - cy;
        for x in 0..w {
            let dx = x as f32 - cx;
            // Inverse map: destination back into source space
            let sx = cx + cos * dx - sin * dy;
            let sy = cy + sin * dx + cos * dy;
            let [r, g, b] = src.sample_bilinear(sx, sy, Border::Constant);
            pixels.push(Pixel::new(to_channel(r), to_channel(g), to_channel(b)));
        }
    }

    Frame::from_pixels(w, h, pixels).unwrap_or_else(|_| src.clone())
}
