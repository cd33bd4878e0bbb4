//! Frame timing utilities.
//!
//! The application runner owns a [`TimeClock`] and calls `tick()` once per
//! frame; everything downstream receives the resulting [`Time`] snapshot.

/// A snapshot of timing information for the current frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    /// Seconds elapsed since the previous frame.  Clamped to a maximum of
    /// 0.1 to prevent spiral-of-death integration on slow frames.
    pub delta: f32,
    /// Number of frames rendered so far (starts at 0 for the first frame).
    pub frame_count: u64,
}

/// Stateful timer that accumulates time and produces [`Time`] snapshots.
pub struct TimeClock {
    last_tick: std::time::Instant,
    frame_count: u64,
}

impl TimeClock {
    pub fn new() -> Self {
        Self {
            last_tick: std::time::Instant::now(),
            frame_count: 0,
        }
    }

    /// Advance by one frame.  Returns the [`Time`] snapshot for this frame.
    pub fn tick(&mut self) -> Time {
        let now = std::time::Instant::now();
        let delta = (now - self.last_tick).as_secs_f32().min(0.1);
        let count = self.frame_count;

        self.last_tick = now;
        self.frame_count += 1;

        Time {
            delta,
            frame_count: count,
        }
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new()
    }
}
