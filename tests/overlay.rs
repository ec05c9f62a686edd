use std::f32::consts::TAU;

use asteroid_overlay::driver::{DriverPhase, SpriteSet};
use asteroid_overlay::raster::{Frame, Pixel, Sprite};
use asteroid_overlay::sim::{Target, create_targets, resolve_collisions};
use asteroid_overlay::{DisplaySink, ExitPoll, FrameSource, Overlay, OverlayError, Settings};
use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

struct Camera {
    width: u32,
    height: u32,
    frames_left: u32,
    released: bool,
}

impl FrameSource for Camera {
    fn try_capture(&mut self) -> Option<Frame> {
        if self.frames_left == 0 {
            return None;
        }
        self.frames_left -= 1;
        Some(Frame::filled(self.width, self.height, Pixel::new(40, 40, 40)))
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[derive(Default)]
struct Screen {
    shown: Vec<(u32, u32)>,
}

impl DisplaySink for Screen {
    fn present(&mut self, frame: &Frame) {
        self.shown.push((frame.width(), frame.height()));
    }
}

struct KeyAfter(u32);

impl ExitPoll for KeyAfter {
    fn exit_requested(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 == 0
    }
}

fn sprites() -> SpriteSet {
    let rgba: Vec<u8> = [200, 100, 50, 255].repeat(32 * 32);
    let asteroid = Sprite::from_rgba(32, 32, &rgba).unwrap();
    let ufo = Sprite::from_rgba(48, 24, &[90u8, 90, 90, 128].repeat(48 * 24)).unwrap();
    SpriteSet { ufo, asteroid }
}

#[test]
fn test_ten_spinning_targets_return_to_zero() {
    let mut rng = Pcg32::seed_from_u64(2024);
    let mut targets = create_targets(
        IVec2::new(640, 480),
        0.0,
        15.0,
        IVec2::new(32, 32),
        10,
        &mut rng,
    );

    for _ in 0..24 {
        for t in &mut targets {
            t.update();
        }
        resolve_collisions(&mut targets, 32, 32);
    }

    for t in &targets {
        assert_eq!(t.angle, 0.0);
        assert!(t.heading >= 0.0 && t.heading < TAU);
    }
}

#[test]
fn test_coincident_targets_swap_exactly_once() {
    let mut rng = Pcg32::seed_from_u64(5);
    let size = IVec2::new(20, 20);
    let bounds = IVec2::new(640, 480);
    let mut targets: Vec<Target> = (0..2)
        .map(|_| Target::new(IVec2::new(90, 90), 0.0, 0.0, bounds, size, &mut rng))
        .collect();
    for t in &mut targets {
        assert_eq!(t.center_origin(), IVec2::new(100, 100));
    }
    let a = (targets[0].speed, targets[0].heading);
    let b = (targets[1].speed, targets[1].heading);

    assert_eq!(resolve_collisions(&mut targets, 20, 20), 1);
    assert_eq!((targets[0].speed, targets[0].heading), b);
    assert_eq!((targets[1].speed, targets[1].heading), a);
}

#[test]
fn test_full_run_resizes_and_releases() {
    let settings = Settings {
        seed: Some(11),
        ufo_count: 2,
        ..Default::default()
    };
    let mut overlay = Overlay::new(settings, sprites());
    let mut camera = Camera {
        width: 1280,
        height: 960,
        frames_left: 100,
        released: false,
    };
    let mut screen = Screen::default();

    let summary = overlay
        .run(&mut camera, &mut screen, &mut KeyAfter(30))
        .unwrap();

    assert_eq!(summary.seed, 11);
    assert_eq!(summary.presented, 30);
    assert!(screen.shown.iter().all(|&dims| dims == (640, 480)));
    // Bounds follow the raw first capture
    assert_eq!(overlay.bounds(), IVec2::new(1280, 960));
    assert_eq!(overlay.phase(), DriverPhase::Stopped);
    assert!(camera.released);

    for pool in overlay.pools() {
        for t in &pool.targets {
            assert!(t.angle >= 0.0 && t.angle < 360.0);
            assert!(t.heading >= 0.0 && t.heading < TAU);
        }
    }
}

#[test]
fn test_same_seed_same_run() {
    let run = || {
        let settings = Settings {
            seed: Some(77),
            ..Default::default()
        };
        let mut overlay = Overlay::new(settings, sprites());
        let mut camera = Camera {
            width: 640,
            height: 480,
            frames_left: 50,
            released: false,
        };
        let summary = overlay
            .run(&mut camera, &mut Screen::default(), &mut KeyAfter(40))
            .unwrap();
        let positions: Vec<IVec2> = overlay.pools()[1].targets.iter().map(|t| t.pos).collect();
        (summary, positions)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_dead_camera_exits_early() {
    let mut overlay = Overlay::new(Settings::default(), sprites());
    let mut camera = Camera {
        width: 640,
        height: 480,
        frames_left: 0,
        released: false,
    };

    let result = overlay.run(&mut camera, &mut Screen::default(), &mut KeyAfter(1));
    assert!(matches!(result, Err(OverlayError::FirstFrameUnavailable)));
    assert!(camera.released);
    assert!(overlay.pools().iter().all(|p| p.targets.is_empty()));
}
