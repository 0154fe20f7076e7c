//! Wall-clock frame timing
//!
//! Kept outside the simulation so ticks can be driven by synthetic deltas in
//! tests and replays.

use std::time::Instant;

use crate::clamp_dt;

/// Measures elapsed time between frames
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Seconds since the previous call, clamped to `[0, MAX_DT]`.
    /// The first call returns 0.
    pub fn delta(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        clamp_dt(dt)
    }

    /// Forget the previous frame (e.g. after a restart or a long pause)
    pub fn reset(&mut self) {
        self.last = None;
    }
}
