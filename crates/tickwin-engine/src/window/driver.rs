use crate::core::Engine;
use crate::device::ClearColor;
use crate::input::{Input, InputEvent};
use crate::platform::{Platform, WindowHints};
use crate::time::{FrameClock, TickAccumulator};

use super::center::centered_position;
use super::config::WindowConfig;
use super::error::InitError;

/// Setup progress of a `Window`. Advances strictly in declaration order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverState {
    Unstarted,
    Initialized,
    HintsSet,
    Created,
    Positioned,
    ContextReady,
    Looping,
    Stopped,
}

/// Window driver: setup, frame loop and teardown over a `Platform`.
///
/// A failed `start` releases whatever was acquired and leaves the driver
/// `Unstarted`, so the caller may retry. A completed run leaves it `Stopped`.
pub struct Window<P: Platform> {
    config: WindowConfig,
    platform: P,
    handle: Option<P::Window>,
    input: Input,
    state: DriverState,
}

impl<P: Platform> Window<P> {
    pub fn new(config: WindowConfig, platform: P) -> Self {
        Self {
            config,
            platform,
            handle: None,
            input: Input::new(),
            state: DriverState::Unstarted,
        }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Runs the full lifecycle and blocks until the window is closed.
    ///
    /// `on_start` runs before anything native is touched; `on_stop` runs only
    /// after a clean teardown and is skipped when setup fails.
    pub fn start<E: Engine>(&mut self, engine: &mut E) -> Result<(), InitError> {
        if self.state != DriverState::Unstarted {
            return Err(InitError::AlreadyStarted);
        }

        engine.on_start();

        self.init()?;
        self.apply_hints();
        self.create_window()?;
        self.center_window();
        self.finish_setup()?;

        self.run_loop(engine);
        self.stop();

        engine.on_stop();
        Ok(())
    }

    fn init(&mut self) -> Result<(), InitError> {
        log::info!(
            "starting window of width {} and height {}",
            self.config.width,
            self.config.height
        );

        self.platform.init().map_err(|e| {
            log::error!("failed to initialize window library: {e:#}");
            InitError::LibraryInit(format!("{e:#}"))
        })?;

        self.state = DriverState::Initialized;
        Ok(())
    }

    fn apply_hints(&mut self) {
        let hints = WindowHints::for_config(&self.config);
        if hints.fullscreen {
            log::info!("windowed fullscreen requested");
        }

        self.platform.apply_hints(&hints);
        self.state = DriverState::HintsSet;
    }

    fn create_window(&mut self) -> Result<(), InitError> {
        let window = match self.platform.create_window(&self.config) {
            Ok(window) => window,
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.platform.terminate();
                self.state = DriverState::Unstarted;
                return Err(InitError::WindowCreation(format!("{e:#}")));
            }
        };

        // Config size is logical; input reports the physical content size.
        self.input.init(&self.config);
        self.input
            .apply_event(InputEvent::Resized(self.platform.window_size(&window)));
        self.handle = Some(window);
        self.state = DriverState::Created;
        Ok(())
    }

    fn center_window(&mut self) {
        let Some(window) = self.handle.as_mut() else {
            return;
        };

        let size = self.platform.window_size(window);
        match self.platform.primary_display_size(window) {
            Some(screen) => {
                let pos = centered_position(screen, size);
                self.platform.set_window_position(window, pos);
                log::info!("window centered on primary display at ({}, {})", pos.x, pos.y);
            }
            None => log::warn!("no primary display reported; window left at default position"),
        }

        self.state = DriverState::Positioned;
    }

    fn finish_setup(&mut self) -> Result<(), InitError> {
        let Some(window) = self.handle.as_mut() else {
            return Ok(());
        };

        if let Err(e) = self.platform.make_context_current(window) {
            log::error!("failed to create graphics context: {e:#}");
            self.release();
            self.state = DriverState::Unstarted;
            return Err(InitError::GraphicsContext(format!("{e:#}")));
        }

        self.platform.set_swap_interval(window, self.config.swap_interval());
        self.platform.show_window(window);
        self.platform.load_graphics(window);
        self.platform.set_clear_color(window, ClearColor::DEFAULT);

        self.state = DriverState::ContextReady;
        Ok(())
    }

    fn run_loop<E: Engine>(&mut self, engine: &mut E) {
        self.state = DriverState::Looping;

        let Some(window) = self.handle.as_mut() else {
            return;
        };

        let mut clock = FrameClock::new(self.platform.elapsed());
        let mut ticks = TickAccumulator::new();

        while !self.platform.should_close(window) {
            let frame = clock.tick(self.platform.elapsed());

            self.platform.clear(window);
            engine.on_update(frame.dt, &self.input);

            if let Some(accumulated) = ticks.advance(frame.dt) {
                engine.on_tick(accumulated);
            }

            self.input.update();

            self.platform.swap_buffers(window);
            self.platform.poll_events(window, &mut self.input);
        }

        log::debug!("frame loop exited after {} frames", clock.frame_index());
    }

    /// Releases the window and shuts the platform down.
    ///
    /// Safe to call more than once; later calls do nothing.
    pub fn stop(&mut self) {
        if self.handle.is_none() {
            log::debug!("stop called on a window that is not running");
            return;
        }

        log::info!("stopping window gracefully");
        self.release();
        self.state = DriverState::Stopped;
        log::info!("window closed gracefully");
    }

    fn release(&mut self) {
        if let Some(mut window) = self.handle.take() {
            self.platform.release_callbacks(&mut window);
            self.platform.destroy_window(window);
        }
        self.platform.terminate();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use anyhow::{anyhow, Result};

    use super::*;
    use crate::coords::{Extent, Position};
    use crate::input::{InputEvent, Key, PressState};

    type Trace = Rc<RefCell<Vec<String>>>;

    fn trace() -> Trace {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn entries(trace: &Trace) -> Vec<String> {
        trace.borrow().clone()
    }

    fn count(trace: &Trace, name: &str) -> usize {
        trace.borrow().iter().filter(|e| e.as_str() == name).count()
    }

    // ── fake platform ─────────────────────────────────────────────────────

    struct FakeWindow;

    struct FakePlatform {
        trace: Trace,
        fail_init: bool,
        fail_create: bool,
        fail_context: bool,
        display: Option<Extent>,
        content_size: Extent,
        frames_until_close: usize,
        frame_time: Duration,
        /// Events delivered by the poll that ends frame `n`.
        scripted: Vec<(usize, InputEvent)>,

        now: Duration,
        polls: usize,
        hints: Option<WindowHints>,
        swap_interval: Option<u32>,
        position: Option<Position>,
    }

    impl FakePlatform {
        fn new(trace: &Trace, frames_until_close: usize) -> Self {
            Self {
                trace: trace.clone(),
                fail_init: false,
                fail_create: false,
                fail_context: false,
                display: Some(Extent::new(1920, 1080)),
                content_size: Extent::new(800, 600),
                frames_until_close,
                frame_time: Duration::from_millis(20),
                scripted: Vec::new(),
                now: Duration::ZERO,
                polls: 0,
                hints: None,
                swap_interval: None,
                position: None,
            }
        }

        fn record(&self, entry: impl Into<String>) {
            self.trace.borrow_mut().push(entry.into());
        }
    }

    impl Platform for FakePlatform {
        type Window = FakeWindow;

        fn init(&mut self) -> Result<()> {
            self.record("init");
            if self.fail_init {
                return Err(anyhow!("no display server"));
            }
            Ok(())
        }

        fn elapsed(&self) -> Duration {
            self.now
        }

        fn apply_hints(&mut self, hints: &WindowHints) {
            self.record("hints");
            self.hints = Some(*hints);
        }

        fn create_window(&mut self, config: &WindowConfig) -> Result<FakeWindow> {
            self.record("create");
            if self.fail_create {
                return Err(anyhow!("refused {}x{}", config.width, config.height));
            }
            Ok(FakeWindow)
        }

        fn window_size(&self, _window: &FakeWindow) -> Extent {
            self.content_size
        }

        fn primary_display_size(&self, _window: &FakeWindow) -> Option<Extent> {
            self.display
        }

        fn set_window_position(&mut self, _window: &mut FakeWindow, position: Position) {
            self.record("position");
            self.position = Some(position);
        }

        fn make_context_current(&mut self, _window: &mut FakeWindow) -> Result<()> {
            self.record("context");
            if self.fail_context {
                return Err(anyhow!("no adapter"));
            }
            Ok(())
        }

        fn set_swap_interval(&mut self, _window: &mut FakeWindow, interval: u32) {
            self.record("swap_interval");
            self.swap_interval = Some(interval);
        }

        fn show_window(&mut self, _window: &mut FakeWindow) {
            self.record("show");
        }

        fn load_graphics(&mut self, _window: &mut FakeWindow) {
            self.record("load");
        }

        fn set_clear_color(&mut self, _window: &mut FakeWindow, color: ClearColor) {
            assert_eq!(color, ClearColor::new(0.5, 0.5, 0.5, 0.0));
            self.record("clear_color");
        }

        fn should_close(&self, _window: &FakeWindow) -> bool {
            self.polls >= self.frames_until_close
        }

        fn clear(&mut self, _window: &mut FakeWindow) {
            self.record("clear");
        }

        fn swap_buffers(&mut self, _window: &mut FakeWindow) {
            self.record("swap");
        }

        fn poll_events(&mut self, _window: &mut FakeWindow, input: &mut Input) {
            self.record("poll");
            for (_, ev) in self.scripted.iter().filter(|(n, _)| *n == self.polls) {
                input.apply_event(ev.clone());
            }
            self.polls += 1;
            self.now += self.frame_time;
        }

        fn release_callbacks(&mut self, _window: &mut FakeWindow) {
            self.record("release_callbacks");
        }

        fn destroy_window(&mut self, _window: FakeWindow) {
            self.record("destroy");
        }

        fn terminate(&mut self) {
            self.record("terminate");
        }
    }

    // ── recording engine ──────────────────────────────────────────────────

    struct RecordingEngine {
        trace: Trace,
        deltas: Vec<f32>,
        ticks: Vec<f32>,
        space_pressed: Vec<bool>,
        space_down: Vec<bool>,
        window_sizes: Vec<Extent>,
    }

    impl RecordingEngine {
        fn new(trace: &Trace) -> Self {
            Self {
                trace: trace.clone(),
                deltas: Vec::new(),
                ticks: Vec::new(),
                space_pressed: Vec::new(),
                space_down: Vec::new(),
                window_sizes: Vec::new(),
            }
        }
    }

    impl Engine for RecordingEngine {
        fn on_start(&mut self) {
            self.trace.borrow_mut().push("engine.start".into());
        }

        fn on_stop(&mut self) {
            self.trace.borrow_mut().push("engine.stop".into());
        }

        fn on_tick(&mut self, accumulated: f32) {
            self.trace.borrow_mut().push("engine.tick".into());
            self.ticks.push(accumulated);
        }

        fn on_update(&mut self, delta: f32, input: &Input) {
            self.trace.borrow_mut().push("engine.update".into());
            self.deltas.push(delta);
            self.space_pressed.push(input.key_pressed(Key::Space));
            self.space_down.push(input.key_down(Key::Space));
            self.window_sizes.push(input.window_size());
        }
    }

    fn run(
        platform: FakePlatform,
        config: WindowConfig,
        trace: &Trace,
    ) -> (Window<FakePlatform>, RecordingEngine, Result<(), InitError>) {
        let mut window = Window::new(config, platform);
        let mut engine = RecordingEngine::new(trace);
        let result = window.start(&mut engine);
        (window, engine, result)
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn full_lifecycle_runs_in_order() {
        let t = trace();
        let (window, _, result) = run(FakePlatform::new(&t, 1), WindowConfig::new(800, 600), &t);

        assert!(result.is_ok());
        assert_eq!(window.state(), DriverState::Stopped);
        assert_eq!(
            entries(&t),
            [
                "engine.start",
                "init",
                "hints",
                "create",
                "position",
                "context",
                "swap_interval",
                "show",
                "load",
                "clear_color",
                "clear",
                "engine.update",
                "swap",
                "poll",
                "release_callbacks",
                "destroy",
                "terminate",
                "engine.stop",
            ]
        );
    }

    #[test]
    fn start_and_stop_fire_once_around_the_loop() {
        let t = trace();
        let (_, engine, _) = run(FakePlatform::new(&t, 5), WindowConfig::default(), &t);

        assert_eq!(count(&t, "engine.start"), 1);
        assert_eq!(count(&t, "engine.stop"), 1);

        let log = entries(&t);
        let first_frame = log.iter().position(|e| e == "engine.update").unwrap();
        assert!(log[..first_frame].contains(&"engine.start".to_string()));
        assert_eq!(log.last().map(String::as_str), Some("engine.stop"));
        assert_eq!(engine.deltas.len(), 5);
    }

    #[test]
    fn window_closed_before_first_frame_skips_callbacks() {
        let t = trace();
        let (_, engine, result) = run(FakePlatform::new(&t, 0), WindowConfig::default(), &t);

        assert!(result.is_ok());
        assert!(engine.deltas.is_empty());
        assert_eq!(count(&t, "engine.stop"), 1);
    }

    // ── frame timing ──────────────────────────────────────────────────────

    #[test]
    fn update_runs_every_frame_with_non_negative_delta() {
        let t = trace();
        let (_, engine, _) = run(FakePlatform::new(&t, 10), WindowConfig::default(), &t);

        assert_eq!(engine.deltas.len(), 10);
        assert_eq!(count(&t, "clear"), 10);
        assert_eq!(count(&t, "swap"), 10);
        assert!(engine.deltas.iter().all(|d| *d >= 0.0));
        // The first frame is measured from loop entry; later ones from the previous frame.
        assert_eq!(engine.deltas[0], 0.0);
        assert!(engine.deltas[1..].iter().all(|d| (d - 0.02).abs() < 1e-6));
    }

    #[test]
    fn ticks_fire_with_accumulated_time_after_threshold() {
        let t = trace();
        let (_, engine, _) = run(FakePlatform::new(&t, 10), WindowConfig::default(), &t);

        // 0, .02, .04, .06 -> fire at frame 4; .02, .04, .06 -> fire at frame 8.
        assert_eq!(engine.ticks.len(), 2);
        for tick in &engine.ticks {
            assert!(*tick > 0.05);
            assert!((tick - 0.06).abs() < 1e-5);
        }
    }

    #[test]
    fn tick_follows_update_within_a_frame() {
        let t = trace();
        run(FakePlatform::new(&t, 6), WindowConfig::default(), &t);

        let log = entries(&t);
        let tick = log.iter().position(|e| e == "engine.tick").unwrap();
        assert_eq!(log[tick - 1], "engine.update");
        assert_eq!(log[tick + 1], "swap");
    }

    // ── configuration ─────────────────────────────────────────────────────

    #[test]
    fn construction_values_are_exposed() {
        let t = trace();
        let config = WindowConfig::new(800, 600)
            .fullscreen(false)
            .resizable(true)
            .vsync(true)
            .title("T");
        let window = Window::new(config, FakePlatform::new(&t, 0));

        assert_eq!(window.width(), 800);
        assert_eq!(window.height(), 600);
        assert_eq!(window.config().title, "T");
        assert_eq!(window.state(), DriverState::Unstarted);
    }

    #[test]
    fn hints_and_swap_interval_follow_config() {
        let t = trace();
        let config = WindowConfig::new(800, 600).resizable(true).vsync(true);
        let (window, _, _) = run(FakePlatform::new(&t, 0), config, &t);

        let hints = window.platform().hints.unwrap();
        assert!(!hints.visible);
        assert!(hints.resizable);
        assert_eq!((hints.context.major, hints.context.minor), (3, 2));
        assert!(hints.context.core_profile && hints.context.forward_compat);
        assert_eq!(window.platform().swap_interval, Some(1));
    }

    #[test]
    fn window_is_centered_on_primary_display() {
        let t = trace();
        let (window, _, _) = run(FakePlatform::new(&t, 0), WindowConfig::new(800, 600), &t);
        assert_eq!(window.platform().position, Some(Position::new(560, 240)));
    }

    #[test]
    fn missing_display_skips_centering() {
        let t = trace();
        let mut platform = FakePlatform::new(&t, 0);
        platform.display = None;
        let (window, _, result) = run(platform, WindowConfig::new(800, 600), &t);

        assert!(result.is_ok());
        assert_eq!(window.platform().position, None);
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn library_init_failure_exits_with_minus_one() {
        let t = trace();
        let mut platform = FakePlatform::new(&t, 3);
        platform.fail_init = true;
        let (window, engine, result) = run(platform, WindowConfig::default(), &t);

        let err = result.unwrap_err();
        assert!(matches!(err, InitError::LibraryInit(_)));
        assert_eq!(err.exit_code(), -1);
        assert_eq!(entries(&t), ["engine.start", "init"]);
        assert!(engine.deltas.is_empty());
        assert_eq!(window.state(), DriverState::Unstarted);
    }

    #[test]
    fn window_creation_failure_exits_with_minus_two() {
        let t = trace();
        let mut platform = FakePlatform::new(&t, 3);
        platform.fail_create = true;
        let (window, _, result) = run(platform, WindowConfig::default(), &t);

        let err = result.unwrap_err();
        assert!(matches!(err, InitError::WindowCreation(_)));
        assert_eq!(err.exit_code(), -2);
        assert!(err.to_string().contains("refused 1080x720"));
        assert_eq!(entries(&t), ["engine.start", "init", "hints", "create", "terminate"]);
        assert_eq!(window.state(), DriverState::Unstarted);
    }

    #[test]
    fn context_failure_releases_the_window() {
        let t = trace();
        let mut platform = FakePlatform::new(&t, 3);
        platform.fail_context = true;
        let (_, engine, result) = run(platform, WindowConfig::default(), &t);

        assert_eq!(result.unwrap_err().exit_code(), -3);
        assert!(engine.deltas.is_empty());
        assert_eq!(count(&t, "destroy"), 1);
        assert_eq!(count(&t, "terminate"), 1);
        assert_eq!(count(&t, "engine.stop"), 0);
    }

    #[test]
    fn second_start_is_rejected() {
        let t = trace();
        let (mut window, mut engine, result) =
            run(FakePlatform::new(&t, 1), WindowConfig::default(), &t);
        assert!(result.is_ok());

        let again = window.start(&mut engine);
        assert!(matches!(again, Err(InitError::AlreadyStarted)));
        assert_eq!(count(&t, "engine.start"), 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let t = trace();
        let (mut window, _, _) = run(FakePlatform::new(&t, 1), WindowConfig::default(), &t);

        window.stop();
        window.stop();

        assert_eq!(count(&t, "destroy"), 1);
        assert_eq!(count(&t, "terminate"), 1);
        assert_eq!(window.state(), DriverState::Stopped);
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn input_reports_physical_content_size_from_first_frame() {
        let t = trace();
        let mut platform = FakePlatform::new(&t, 2);
        // Logical 640x480 opened on a 2x display.
        platform.content_size = Extent::new(1280, 960);
        let (_, engine, _) = run(platform, WindowConfig::new(640, 480), &t);

        assert_eq!(engine.window_sizes.len(), 2);
        assert!(engine.window_sizes.iter().all(|s| *s == Extent::new(1280, 960)));
    }

    #[test]
    fn polled_input_reaches_the_next_update() {
        let t = trace();
        let mut platform = FakePlatform::new(&t, 3);
        platform.scripted.push((
            0,
            InputEvent::Key {
                key: Key::Space,
                state: PressState::Pressed,
                repeat: false,
            },
        ));
        let (_, engine, _) = run(platform, WindowConfig::default(), &t);

        assert_eq!(engine.space_pressed, [false, true, false]);
        assert_eq!(engine.space_down, [false, true, true]);
    }
}
