use tickwin_engine::core::Engine;
use tickwin_engine::input::{Input, Key, MouseButton};

/// Seconds between frame-rate reports.
const REPORT_INTERVAL: f32 = 1.0;

/// Rolling frame-rate window.
#[derive(Debug, Default)]
struct FrameRate {
    frames: u32,
    elapsed: f32,
}

impl FrameRate {
    /// Records a frame. Returns the average rate once a full interval has passed.
    fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed < REPORT_INTERVAL {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        *self = Self::default();
        Some(fps)
    }
}

/// Sample engine: reports frame rate and tick cadence, echoes a few inputs.
#[derive(Debug, Default)]
pub struct DemoEngine {
    frames: u64,
    ticks: u64,
    tick_time: f32,
    rate: FrameRate,
}

impl DemoEngine {
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Average tick payload so far, in seconds.
    pub fn mean_tick(&self) -> Option<f32> {
        (self.ticks > 0).then(|| self.tick_time / self.ticks as f32)
    }
}

impl Engine for DemoEngine {
    fn on_start(&mut self) {
        log::info!("demo engine starting");
    }

    fn on_stop(&mut self) {
        match self.mean_tick() {
            Some(mean) => log::info!("demo engine stopped; mean tick {:.4}s", mean),
            None => log::info!("demo engine stopped before the first tick"),
        }
    }

    fn on_tick(&mut self, accumulated: f32) {
        self.ticks += 1;
        self.tick_time += accumulated;
        log::trace!("tick {} after {:.4}s", self.ticks, accumulated);
    }

    fn on_update(&mut self, delta: f32, input: &Input) {
        self.frames += 1;

        if let Some(fps) = self.rate.record(delta) {
            log::info!("{fps:.1} fps, {} ticks", self.ticks);
        }

        if input.key_pressed(Key::Space) {
            log::info!("space pressed at frame {}", self.frames);
        }

        if input.button_pressed(MouseButton::Left) {
            if let Some((x, y)) = input.pointer_pos() {
                log::info!("click at ({x:.0}, {y:.0})");
            }
        }
    }
}
