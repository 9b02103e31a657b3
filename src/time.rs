//! Frame clock for hosts driving `advance(dt)`.
//!
//! A small timing helper for game loops and demos: real delta time by
//! default, or a fixed step for deterministic runs.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::fixed(1.0 / 60.0);
//! loop {
//!     let (elapsed, dt) = clock.update();
//!     emitter.advance(dt);
//! }
//! ```

use std::time::Instant;

/// Frame timing for simulation loops.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fixed_delta: Option<f32>,
}

impl FrameClock {
    /// Create a clock measuring real frame-to-frame time.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fixed_delta: None,
        }
    }

    /// Create a clock that reports a fixed delta every frame.
    pub fn fixed(step: f32) -> Self {
        let mut clock = Self::new();
        clock.fixed_delta = Some(step);
        clock
    }

    /// Advance the clock by one frame. Returns `(elapsed, delta)` seconds.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();
        self.delta_secs = match self.fixed_delta {
            Some(step) => step,
            None => now.duration_since(self.last_frame).as_secs_f32(),
        };
        self.last_frame = now;
        self.elapsed_secs = match self.fixed_delta {
            Some(step) => step * (self.frame_count + 1) as f32,
            None => now.duration_since(self.start).as_secs_f32(),
        };
        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Seconds since the last `update`.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Seconds since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Frames counted so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
