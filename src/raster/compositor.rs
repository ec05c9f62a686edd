//! Alpha compositing of rotated sprites onto a frame
//!
//! The sprite may sit partly or wholly outside the destination; only the
//! overlapping rectangle is written.

use glam::IVec2;

use super::frame::{Frame, Pixel};
use super::rotate::rotate;
use super::sprite::Sprite;
use crate::consts::{MARKER_COLOR, MARKER_RADIUS};
use crate::sim::Target;

/// Filled dot drawn at a target's center after blending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub radius: i32,
    pub color: Pixel,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            radius: MARKER_RADIUS,
            color: Pixel::from(MARKER_COLOR),
        }
    }
}

/// Destination and sprite-local rectangles of an overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    /// Destination top-left (inclusive)
    pub dst_min: IVec2,
    /// Destination bottom-right (exclusive)
    pub dst_max: IVec2,
    /// Sprite-local top-left matching `dst_min`
    pub src_min: IVec2,
}

impl ClipRect {
    pub fn size(&self) -> IVec2 {
        self.dst_max - self.dst_min
    }
}

/// Overlap of a `size` sprite placed at `pos` with a `bounds` destination
pub fn clip(bounds: IVec2, pos: IVec2, size: IVec2) -> Option<ClipRect> {
    let dst_min = pos.max(IVec2::ZERO);
    let dst_max = (pos + size).min(bounds);
    let src_min = (-pos).max(IVec2::ZERO);
    let src_max = size.min(bounds - pos);

    let empty = dst_min.cmpge(dst_max).any() || src_min.cmpge(src_max).any();
    (!empty).then_some(ClipRect {
        dst_min,
        dst_max,
        src_min,
    })
}

/// Blend `sprite`, rotated by `angle`, onto `dest` at `pos`, then mark
/// `center`.
///
/// Per channel: `dest = alpha * sprite + (1 - alpha) * dest`, truncated to
/// 8 bits. The alpha mask is the upright one. The marker uses absolute
/// frame coordinates and is skipped, along with everything else, when the
/// overlap is empty. Returns whether anything was drawn.
pub fn overlay_image_alpha(
    dest: &mut Frame,
    sprite: &Sprite,
    pos: IVec2,
    angle: f32,
    center: IVec2,
    marker: &Marker,
) -> bool {
    let bounds = IVec2::new(dest.width() as i32, dest.height() as i32);
    let Some(rect) = clip(bounds, pos, sprite.size()) else {
        return false;
    };

    let rotated = rotate(sprite.color(), angle);
    let size = rect.size();

    for row in 0..size.y {
        let sy = rect.src_min.y + row;
        let dy = rect.dst_min.y + row;
        for col in 0..size.x {
            let sx = rect.src_min.x + col;
            let dx = rect.dst_min.x + col;

            let alpha = sprite.alpha_at(sx as u32, sy as u32);
            let (Some(src), Some(dst)) = (rotated.get(sx, sy), dest.get(dx, dy)) else {
                continue;
            };
            dest.set(dx, dy, blend(src, dst, alpha));
        }
    }

    draw_marker(dest, center, marker);
    true
}

/// Draw `target` with `sprite` at its current position and angle
pub fn draw_target(dest: &mut Frame, sprite: &Sprite, target: &Target, marker: &Marker) -> bool {
    let dims = target.dimensions();
    overlay_image_alpha(dest, sprite, dims.pos, dims.angle, target.center, marker)
}

#[inline]
fn blend(src: Pixel, dst: Pixel, alpha: f32) -> Pixel {
    let inv = 1.0 - alpha;
    let (s, d) = (src.to_array(), dst.to_array());
    let mixed: [u8; 3] =
        std::array::from_fn(|c| (alpha * s[c] as f32 + inv * d[c] as f32) as u8);
    Pixel::from(mixed)
}

/// Filled disc, clipped to the frame
///
/// Only rows and columns inside `dest` are visited, so the cost is bounded
/// by the frame size whatever the radius.
pub fn draw_marker(dest: &mut Frame, center: IVec2, marker: &Marker) {
    let r = i64::from(marker.radius.max(0));
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    let (w, h) = (i64::from(dest.width()), i64::from(dest.height()));

    let (x0, x1) = ((cx - r).max(0), (cx + r).min(w - 1));
    let (y0, y1) = ((cy - r).max(0), (cy + r).min(h - 1));
    if x0 > x1 || y0 > y1 {
        return;
    }

    for y in y0..=y1 {
        let dy = y - cy;
        for x in x0..=x1 {
            let dx = x - cx;
            if dx * dx + dy * dy <= r * r {
                // Clamped to the frame, so both fit in i32
                dest.set(x as i32, y as i32, marker.color);
            }
        }
    }
}
