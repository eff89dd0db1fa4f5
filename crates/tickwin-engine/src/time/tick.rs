/// Accumulated seconds that must be exceeded before a tick fires.
///
/// The comparison runs in `f64`: `0.05_f32` is slightly above `0.05`, so an
/// accumulator holding exactly `TICK_THRESHOLD` counts as past it.
pub const TICK_THRESHOLD: f32 = 0.05;

const THRESHOLD_F64: f64 = 0.05;

/// Threshold accumulator driving `Engine::on_tick`.
///
/// Each frame either adds its delta (while the total is at or below the
/// threshold) or, once the total has gone past it, fires with the total and
/// starts over from zero. The delta of the firing frame is dropped, so the
/// cadence drifts with frame time and the payload is rarely exactly the
/// threshold.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TickAccumulator {
    accumulated: f32,
}

impl TickAccumulator {
    pub const fn new() -> Self {
        Self { accumulated: 0.0 }
    }

    /// Time collected since the last tick.
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    /// Feeds one frame delta. Returns the payload for `on_tick` when it fires.
    pub fn advance(&mut self, delta: f32) -> Option<f32> {
        if f64::from(self.accumulated) <= THRESHOLD_F64 {
            self.accumulated += delta;
            None
        } else {
            let fired = self.accumulated;
            self.accumulated = 0.0;
            Some(fired)
        }
    }
}
