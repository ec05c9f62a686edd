//! Pixel and frame buffer types

use bytemuck::{Pod, Zeroable};

use crate::error::{OverlayError, Result};

/// 8-bit RGB pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// How samples outside the raster are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Border {
    /// Nearest edge pixel
    Replicate,
    /// Black
    Constant,
}

/// Row-major RGB raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Frame {
    /// A raster filled with a single color
    pub fn filled(width: u32, height: u32, color: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// Wrap tightly packed RGB bytes
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = (width * height) as usize * 3;
        if bytes.len() != expected {
            return Err(OverlayError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: bytemuck::cast_slice::<u8, Pixel>(bytes).to_vec(),
        })
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let expected = (width * height) as usize;
        if pixels.len() != expected {
            return Err(OverlayError::BufferSize {
                expected: expected * 3,
                actual: pixels.len() * 3,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed RGB bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// Pixel at (x, y), `None` outside the raster
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Pixel> {
        self.in_bounds(x, y)
            .then(|| self.pixels[self.index(x as u32, y as u32)])
    }

    /// Set a pixel; writes outside the raster are dropped
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Pixel) {
        if self.in_bounds(x, y) {
            let idx = self.index(x as u32, y as u32);
            self.pixels[idx] = color;
        }
    }

    /// Bilinear sample at a fractional position, per channel
    pub(crate) fn sample_bilinear(&self, x: f32, y: f32, border: Border) -> [f32; 3] {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i32, y0 as i32);

        let fetch = |px: i32, py: i32| -> [f32; 3] {
            let p = match border {
                Border::Constant => self.get(px, py).unwrap_or(Pixel::BLACK),
                Border::Replicate => {
                    let cx = px.clamp(0, self.width as i32 - 1);
                    let cy = py.clamp(0, self.height as i32 - 1);
                    self.pixels[self.index(cx as u32, cy as u32)]
                }
            };
            [p.r as f32, p.g as f32, p.b as f32]
        };

        let p00 = fetch(x0, y0);
        let p10 = fetch(x0 + 1, y0);
        let p01 = fetch(x0, y0 + 1);
        let p11 = fetch(x0 + 1, y0 + 1);

        let mut out = [0.0; 3];
        for c in 0..3 {
            let top = p00[c] * (1.0 - fx) + p10[c] * fx;
            let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
            out[c] = top * (1.0 - fy) + bottom * fy;
        }
        out
    }

    /// Resize to `width`, keeping the aspect ratio (height truncates)
    pub fn resize_to_width(&self, width: u32) -> Frame {
        if width == self.width {
            return self.clone();
        }
        if self.width == 0 || self.height == 0 || width == 0 {
            return Frame::filled(width, 0, Pixel::BLACK);
        }

        let ratio = width as f64 / self.width as f64;
        let height = (self.height as f64 * ratio) as u32;
        let sx = self.width as f32 / width as f32;
        let sy = self.height as f32 / height.max(1) as f32;

        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let src_y = (y as f32 + 0.5) * sy - 0.5;
            for x in 0..width {
                let src_x = (x as f32 + 0.5) * sx - 0.5;
                let [r, g, b] = self.sample_bilinear(src_x, src_y, Border::Replicate);
                pixels.push(Pixel::new(to_channel(r), to_channel(g), to_channel(b)));
            }
        }

        Frame {
            width,
            height,
            pixels,
        }
    }
}

/// Round a blended channel back to 8 bits
#[inline]
pub(crate) fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
