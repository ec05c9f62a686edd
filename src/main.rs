//! Asteroid Overlay entry point
//!
//! Camera, window and keyboard access live outside this crate. The native
//! binary wires the frame loop to stand-ins: a synthetic test pattern for
//! the camera, procedural sprites for the PNG assets, a logging sink for
//! the window and a frame budget for the exit key.

use std::process::ExitCode;

use asteroid_overlay::driver::SpriteSet;
use asteroid_overlay::raster::{Frame, Pixel, Sprite};
use asteroid_overlay::{DisplaySink, ExitPoll, FrameSource, Overlay, Result, Settings};

/// Settings file, overridable with `OVERLAY_SETTINGS`
const SETTINGS_PATH: &str = "overlay.json";
/// Frames shown before the stand-in exit key fires
const DEMO_FRAMES: u32 = 300;

/// Scrolling gradient at camera resolution
struct TestPattern {
    width: u32,
    height: u32,
    tick: u32,
}

impl FrameSource for TestPattern {
    fn try_capture(&mut self) -> Option<Frame> {
        let mut frame = Frame::filled(self.width, self.height, Pixel::new(16, 16, 32));
        let shift = self.tick * 4;
        for y in 0..self.height {
            for x in 0..self.width {
                let r = ((x + shift) % 256) as u8;
                let b = ((y + shift / 2) % 256) as u8;
                frame.set(x as i32, y as i32, Pixel::new(r / 2, 32, b / 2));
            }
        }
        self.tick += 1;
        Some(frame)
    }

    fn release(&mut self) {
        log::info!("Test pattern closed after {} frames", self.tick);
    }
}

/// Logs a cheap checksum instead of opening a window
struct LogSink;

impl DisplaySink for LogSink {
    fn present(&mut self, frame: &Frame) {
        let sum: u64 = frame.as_bytes().iter().map(|&b| b as u64).sum();
        log::debug!("Frame {}x{} checksum {}", frame.width(), frame.height(), sum);
    }
}

struct FrameBudget(u32);

impl ExitPoll for FrameBudget {
    fn exit_requested(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 == 0
    }
}

/// RGBA disc with a soft rim and darker craters
fn asteroid_sprite(size: u32) -> Result<Sprite> {
    let c = size as f32 / 2.0;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let (dx, dy) = (x as f32 + 0.5 - c, y as f32 + 0.5 - c);
            let d = (dx * dx + dy * dy).sqrt() / c;
            let crater = ((dx * 0.7).sin() * (dy * 0.9).cos()).abs() > 0.8;
            let shade = if crater { 90 } else { 150 };
            let alpha = ((1.0 - d) * 8.0).clamp(0.0, 1.0);
            rgba.extend_from_slice(&[shade, shade - 20, shade - 40, (alpha * 255.0) as u8]);
        }
    }
    Sprite::from_rgba(size, size, &rgba)
}

/// RGBA saucer: flat ellipse with a dome
fn ufo_sprite(width: u32, height: u32) -> Result<Sprite> {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let nx = (x as f32 + 0.5 - cx) / cx;
            let ny = (y as f32 + 0.5 - cy) / cy;
            let hull = nx * nx + (ny * 2.5) * (ny * 2.5) <= 1.0;
            let dome = ny < 0.0 && (nx * 2.5) * (nx * 2.5) + ny * ny <= 1.0;
            let px: [u8; 4] = match (dome, hull) {
                (true, _) => [120, 200, 255, 200],
                (false, true) => [180, 180, 190, 255],
                _ => [0, 0, 0, 0],
            };
            rgba.extend_from_slice(&px);
        }
    }
    Sprite::from_rgba(width, height, &rgba)
}

fn run() -> Result<()> {
    let path = std::env::var("OVERLAY_SETTINGS").unwrap_or_else(|_| SETTINGS_PATH.to_string());
    let settings = Settings::load_or_default(path)?;

    let sprites = SpriteSet {
        ufo: ufo_sprite(64, 40)?,
        asteroid: asteroid_sprite(48)?,
    };
    let mut overlay = Overlay::new(settings, sprites);

    let mut camera = TestPattern {
        width: 1280,
        height: 720,
        tick: 0,
    };
    let summary = overlay.run(&mut camera, &mut LogSink, &mut FrameBudget(DEMO_FRAMES))?;

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Cannot encode summary: {}", e),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Asteroid Overlay starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
