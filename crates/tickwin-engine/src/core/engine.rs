use crate::input::Input;

/// Lifecycle contract implemented by the application.
///
/// The driver calls the hooks in a fixed order on a single thread:
///
/// 1. `on_start` once, before any window resource exists
/// 2. per frame: `on_update`, then `on_tick` when the accumulator fires
/// 3. `on_stop` once, after every window resource has been released
pub trait Engine {
    /// Called once before the platform is initialized.
    fn on_start(&mut self) {}

    /// Called once after teardown.
    fn on_stop(&mut self) {}

    /// Called when accumulated frame time exceeds the tick threshold.
    ///
    /// `accumulated` is the time that built up before the threshold was
    /// crossed, not the threshold itself.
    fn on_tick(&mut self, accumulated: f32) {
        let _ = accumulated;
    }

    /// Called exactly once per frame with seconds since the previous frame.
    fn on_update(&mut self, delta: f32, input: &Input);
}
