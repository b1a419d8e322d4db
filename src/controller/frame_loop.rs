use tracing::trace;

use super::fps_controller::{FpsController, FrameReport};
use super::physics::CapsuleMover;
use crate::model::Scene;

/// Turns monotonic timestamps into frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    /// Longest step handed out, so a stall does not tunnel the body through the floor
    pub max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            last_time: None,
            max_dt: 0.1,
        }
    }
}

impl FrameClock {
    /// A negative `max_dt` is treated as zero.
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_time: None,
            max_dt: max_dt.max(0.0),
        }
    }

    /// Seconds since the previous tick. The first tick returns 0.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.last_time {
            // min/max rather than clamp: `max_dt` is public and may be set below zero
            Some(last) => ((now - last) as f32).min(self.max_dt).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(now);
        dt
    }

    pub fn reset(&mut self) {
        self.last_time = None;
    }
}

/// Main loop state: the scene, the controller driving it and the clock
pub struct FrameLoop<M: CapsuleMover> {
    pub scene: Scene,
    pub controller: FpsController<M>,
    pub clock: FrameClock,
    frame: u64,
}

impl<M: CapsuleMover> FrameLoop<M> {
    pub fn new(scene: Scene, controller: FpsController<M>) -> Self {
        Self {
            scene,
            controller,
            clock: FrameClock::default(),
            frame: 0,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame using the wall-clock timestamp `now` (seconds)
    pub fn tick(&mut self, now: f64) -> Option<FrameReport> {
        let dt = self.clock.tick(now);
        self.step(dt)
    }

    /// Advance one frame with an explicit `dt`
    pub fn step(&mut self, dt: f32) -> Option<FrameReport> {
        self.frame += 1;
        let report = self.controller.update(&mut self.scene, dt);
        if let Some(r) = &report {
            trace!(frame = self.frame, dt, displacement = ?r.displacement, "frame");
        }
        report
    }

    /// Run `frames` fixed steps, returning the last report
    pub fn run_fixed(&mut self, frames: u32, dt: f32) -> Option<FrameReport> {
        let mut last = None;
        for _ in 0..frames {
            last = self.step(dt);
        }
        last
    }
}
