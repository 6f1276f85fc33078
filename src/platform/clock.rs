//! Time sources and the fixed-step accumulator

use std::time::Instant;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

/// Monotonic time source
pub trait Clock {
    /// Seconds since the clock started
    fn now(&self) -> f64;
    /// Seconds covered by the most recent frame
    fn delta_seconds(&self) -> f32;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
    last_frame: Instant,
    delta: f32,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: 0.0,
        }
    }

    /// Mark a frame boundary and return its delta
    pub fn frame(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.delta
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn delta_seconds(&self) -> f32 {
        self.delta
    }
}

/// Clock that only moves when told to (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
    delta: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.now += f64::from(dt);
        self.delta = dt;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn delta_seconds(&self) -> f32 {
        self.delta
    }
}

/// Splits variable frame deltas into fixed simulation steps
#[derive(Debug, Clone)]
pub struct FrameStepper {
    step: f32,
    accumulator: f32,
}

impl FrameStepper {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// Feed a frame delta; returns how many fixed steps to run.
    /// Negative deltas count as zero and long frames are clamped.
    pub fn feed(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}
