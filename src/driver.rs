//! Frame loop
//!
//! Lock-stepped and single-threaded: each tick captures a frame, draws and
//! advances every target, resolves collisions, presents, then polls for exit.
//! Devices are reached only through the collaborator traits below.

use std::ops::{Deref, DerefMut};

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{ASTEROID_COUNT, ASTEROID_DELTA_ANGLE, START_ANGLE};
use crate::error::{OverlayError, Result};
use crate::raster::{Frame, Marker, Pixel, Sprite, draw_target};
use crate::settings::{CaptureFailurePolicy, Settings};
use crate::sim::{Target, create_targets, resolve_collisions};

/// Video input
pub trait FrameSource {
    /// Blocking capture of the next frame; `None` when none is available
    fn try_capture(&mut self) -> Option<Frame>;

    /// Release the device. Called exactly once when a run ends.
    fn release(&mut self) {}
}

/// Video output
pub trait DisplaySink {
    fn present(&mut self, frame: &Frame);
}

/// Exit request check (keyboard or otherwise)
pub trait ExitPoll {
    fn exit_requested(&mut self) -> bool;
}

/// Releases the capture device when the run leaves scope, on every path
struct CaptureGuard<'a, S: FrameSource + ?Sized> {
    source: &'a mut S,
}

impl<'a, S: FrameSource + ?Sized> CaptureGuard<'a, S> {
    fn new(source: &'a mut S) -> Self {
        Self { source }
    }
}

impl<S: FrameSource + ?Sized> Deref for CaptureGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.source
    }
}

impl<S: FrameSource + ?Sized> DerefMut for CaptureGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.source
    }
}

impl<S: FrameSource + ?Sized> Drop for CaptureGuard<'_, S> {
    fn drop(&mut self) {
        self.source.release();
        log::debug!("Capture device released");
    }
}

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// No frame seen yet; pools are empty
    WaitingFirstFrame,
    /// Pools spawned, ticking
    Running,
    /// Loop exited
    Stopped,
}

/// The two sprite bitmaps, decoded by the caller
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub ufo: Sprite,
    pub asteroid: Sprite,
}

/// Targets sharing one sprite
#[derive(Debug, Clone)]
pub struct Pool {
    pub name: &'static str,
    pub sprite: Sprite,
    pub targets: Vec<Target>,
    /// Whether the pool takes part in collision resolution
    pub collides: bool,
}

/// Counters reported when a run ends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    /// Loop iterations after the first frame
    pub ticks: u64,
    /// Ticks that reached the display
    pub presented: u64,
    /// Ticks dropped on capture failure
    pub skipped: u64,
    /// Velocity swaps performed
    pub swaps: u64,
}

/// Simulation plus frame loop state
pub struct Overlay {
    settings: Settings,
    pools: Vec<Pool>,
    rng: Pcg32,
    phase: DriverPhase,
    bounds: IVec2,
    marker: Marker,
    summary: RunSummary,
}

impl Overlay {
    pub fn new(settings: Settings, sprites: SpriteSet) -> Self {
        let seed = settings.resolve_seed();
        log::info!("Overlay seed: {}", seed);

        let marker = Marker {
            radius: settings.marker_radius,
            color: Pixel::from(settings.marker_color),
        };
        let pools = vec![
            Pool {
                name: "ufo",
                sprite: sprites.ufo,
                targets: Vec::new(),
                collides: false,
            },
            Pool {
                name: "asteroid",
                sprite: sprites.asteroid,
                targets: Vec::new(),
                collides: true,
            },
        ];

        Self {
            settings,
            pools,
            rng: Pcg32::seed_from_u64(seed),
            phase: DriverPhase::WaitingFirstFrame,
            bounds: IVec2::ZERO,
            marker,
            summary: RunSummary {
                seed,
                ..Default::default()
            },
        }
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    /// Frame size the targets bounce inside (zero before the first frame)
    pub fn bounds(&self) -> IVec2 {
        self.bounds
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    pub fn pools_mut(&mut self) -> &mut [Pool] {
        &mut self.pools
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Take bounds from the first frame and spawn the pools.
    ///
    /// Bounds are the raw capture size unless `bounds_from_display` asks
    /// for the size after the display resize.
    pub fn start(&mut self, first: &Frame) {
        let (width, height) = if self.settings.bounds_from_display {
            let shown = first.resize_to_width(self.settings.display_width);
            (shown.width(), shown.height())
        } else {
            (first.width(), first.height())
        };
        self.bounds = IVec2::new(width as i32, height as i32);
        log::info!("First frame: {}x{}", self.bounds.x, self.bounds.y);

        let counts = [
            (self.settings.ufo_count, self.settings.ufo_delta_angle),
            (ASTEROID_COUNT, ASTEROID_DELTA_ANGLE),
        ];
        for (pool, (count, delta_angle)) in self.pools.iter_mut().zip(counts) {
            pool.targets = create_targets(
                self.bounds,
                START_ANGLE,
                delta_angle,
                pool.sprite.size(),
                count,
                &mut self.rng,
            );
            log::info!(
                "Spawned {} {} targets ({}x{}, {}°/tick)",
                count,
                pool.name,
                pool.sprite.width(),
                pool.sprite.height(),
                delta_angle
            );
        }

        self.phase = DriverPhase::Running;
    }

    /// Draw then advance every active target, then resolve collisions.
    ///
    /// The collision threshold is the size of the last sprite drawn this
    /// tick; nothing drawn means no resolution. Returns the swap count.
    pub fn step(&mut self, frame: &mut Frame) -> usize {
        let mut last_drawn = None;
        for pool in &mut self.pools {
            for target in pool.targets.iter_mut().filter(|t| t.active) {
                draw_target(frame, &pool.sprite, target, &self.marker);
                last_drawn = Some(target.size);
                target.update();
            }
        }

        let Some(threshold) = last_drawn else {
            return 0;
        };
        let swaps: usize = self
            .pools
            .iter_mut()
            .filter(|pool| pool.collides)
            .map(|pool| resolve_collisions(&mut pool.targets, threshold.x, threshold.y))
            .sum();
        self.summary.swaps += swaps as u64;
        swaps
    }

    /// Capture honoring the retry budget of the failure policy
    fn capture<S: FrameSource + ?Sized>(&self, source: &mut S) -> Option<Frame> {
        let attempts = self.settings.capture_failure.extra_attempts().saturating_add(1);
        (0..attempts).find_map(|_| source.try_capture())
    }

    /// Run until an exit is requested.
    ///
    /// Fails with `FirstFrameUnavailable` when the first capture fails, and
    /// with `CaptureLost` on a later failure under the `Terminate` policy.
    /// The source is released on every exit path.
    pub fn run<S, D, E>(&mut self, source: &mut S, sink: &mut D, exit: &mut E) -> Result<RunSummary>
    where
        S: FrameSource + ?Sized,
        D: DisplaySink + ?Sized,
        E: ExitPoll + ?Sized,
    {
        let mut source = CaptureGuard::new(source);
        self.phase = DriverPhase::WaitingFirstFrame;

        let Some(first) = source.try_capture() else {
            self.phase = DriverPhase::Stopped;
            return Err(OverlayError::FirstFrameUnavailable);
        };
        self.start(&first);

        let policy = self.settings.capture_failure;
        let mut was_capturing = true;
        loop {
            let tick = self.summary.ticks;
            self.summary.ticks += 1;

            match self.capture(&mut *source) {
                Some(frame) => {
                    let mut frame = frame.resize_to_width(self.settings.display_width);
                    self.step(&mut frame);
                    sink.present(&frame);
                    self.summary.presented += 1;
                    was_capturing = true;
                }
                None if policy == CaptureFailurePolicy::Terminate => {
                    log::error!("Capture failed at tick {} ({}), stopping", tick, policy.as_str());
                    self.phase = DriverPhase::Stopped;
                    return Err(OverlayError::CaptureLost { tick });
                }
                None => {
                    if was_capturing {
                        log::warn!("Capture failed at tick {} ({}), skipping", tick, policy.as_str());
                    } else {
                        log::debug!("Capture still failing at tick {}", tick);
                    }
                    self.summary.skipped += 1;
                    was_capturing = false;
                }
            }

            if exit.exit_requested() {
                log::info!("Exit requested after {} ticks", self.summary.ticks);
                break;
            }
        }

        self.phase = DriverPhase::Stopped;
        log::info!("Run finished: {:?}", self.summary);
        Ok(self.summary.clone())
    }
}
