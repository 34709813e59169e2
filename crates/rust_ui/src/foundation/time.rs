//! Time management utilities

use std::time::{SystemTime, UNIX_EPOCH};

/// Frame-stepped clock driven by the caller's delta time
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    elapsed: f64,
    last_delta: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock at time zero
    pub const fn new() -> Self {
        Self {
            elapsed: 0.0,
            last_delta: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by one frame of `delta_time` seconds. Negative steps count as zero.
    pub fn tick(&mut self, delta_time: f32) {
        let delta_time = delta_time.max(0.0);
        self.last_delta = delta_time;
        self.elapsed += f64::from(delta_time);
        self.frame_count += 1;
    }

    /// Total elapsed seconds, monotonic
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Delta of the most recent tick
    pub const fn last_delta(&self) -> f32 {
        self.last_delta
    }

    /// Number of ticks so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Milliseconds since the Unix epoch, for key-repeat scheduling
pub fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}
