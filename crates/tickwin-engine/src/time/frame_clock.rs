use std::time::Duration;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame, in seconds.
    pub dt: f32,

    /// Timestamp taken at the tick, relative to the platform epoch.
    pub now: Duration,

    /// Monotonic frame counter, starting at zero.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The clock does not read time itself. The loop feeds it the platform's
/// monotonic timestamp so that tests can script exact frame timings.
///
/// Deltas are not clamped: a stalled frame reports the full stall. A
/// timestamp older than the previous one yields a zero delta.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Duration,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a clock whose first delta is measured from `start`.
    pub fn new(start: Duration) -> Self {
        Self {
            last: start,
            frame_index: 0,
        }
    }

    /// Number of frames ticked so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock to `now` and returns the frame snapshot.
    pub fn tick(&mut self, now: Duration) -> FrameTime {
        let elapsed = now.saturating_sub(self.last);
        self.last = now;

        let ft = FrameTime {
            dt: (elapsed.as_nanos() as f64 / 1e9) as f32,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
