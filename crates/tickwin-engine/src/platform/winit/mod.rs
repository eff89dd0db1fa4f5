//! winit + wgpu implementation of `Platform`.
//!
//! winit is built around an event loop that owns the thread. The driver owns
//! the loop instead, so events are pumped on demand through
//! `EventLoopExtPumpEvents` with a zero timeout. This limits the backend to
//! the desktop platforms that support pumping (Windows, macOS, X11, Wayland).

mod input;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window as NativeWindow, WindowAttributes, WindowId};

use crate::coords::{Extent, Position};
use crate::device::{ClearColor, Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
use crate::input::{Input, InputEvent};
use crate::window::WindowConfig;

use super::{Platform, WindowHints};
use self::input::translate_window_event;

/// Pumps allowed for the event loop to hand out an active loop and create
/// the requested window.
const CREATE_PUMP_ATTEMPTS: usize = 16;

/// Platform backed by a pumped winit event loop and a wgpu surface.
pub struct WinitPlatform {
    gpu_init: GpuInit,
    event_loop: Option<EventLoop<()>>,
    pump: EventPump,
    hints: Option<WindowHints>,
    epoch: Instant,
}

/// Native window plus the graphics context bound to it.
pub struct WinitWindow {
    window: Arc<NativeWindow>,
    gpu: Option<Gpu>,
    frame: Option<GpuFrame>,
    close_requested: bool,
}

impl WinitPlatform {
    pub fn new(gpu_init: GpuInit) -> Self {
        Self {
            gpu_init,
            event_loop: None,
            pump: EventPump::default(),
            hints: None,
            epoch: Instant::now(),
        }
    }
}

impl Default for WinitPlatform {
    fn default() -> Self {
        Self::new(GpuInit::default())
    }
}

/// Application handler fed to each pump.
///
/// Window creation needs an `ActiveEventLoop`, which winit only hands out
/// inside callbacks, so a pending request is fulfilled on the next one.
#[derive(Default)]
struct EventPump {
    pending: Option<WindowAttributes>,
    created: Option<Result<Arc<NativeWindow>, winit::error::OsError>>,
    events: Vec<(WindowId, WindowEvent)>,
}

impl EventPump {
    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(attrs) = self.pending.take() {
            self.created = Some(event_loop.create_window(attrs).map(Arc::new));
        }
    }
}

impl ApplicationHandler for EventPump {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        self.events.push((window_id, event));
    }
}

impl Platform for WinitPlatform {
    type Window = WinitWindow;

    fn init(&mut self) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        self.event_loop = Some(event_loop);
        self.epoch = Instant::now();
        log::debug!("winit event loop ready");
        Ok(())
    }

    fn elapsed(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn apply_hints(&mut self, hints: &WindowHints) {
        let ctx = hints.context;
        log::debug!(
            "window hints: visible={} resizable={} fullscreen={} context={}.{} core={} forward_compat={}",
            hints.visible,
            hints.resizable,
            hints.fullscreen,
            ctx.major,
            ctx.minor,
            ctx.core_profile,
            ctx.forward_compat,
        );
        self.hints = Some(*hints);
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<WinitWindow> {
        let event_loop = self
            .event_loop
            .as_mut()
            .context("windowing library is not initialized")?;
        let hints = self.hints.unwrap_or_else(|| WindowHints::for_config(config));

        let mut attrs = NativeWindow::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(f64::from(config.width), f64::from(config.height)))
            .with_visible(hints.visible)
            .with_resizable(hints.resizable);

        if hints.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        self.pump.pending = Some(attrs);

        for _ in 0..CREATE_PUMP_ATTEMPTS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut self.pump)
            {
                self.pump.pending = None;
                bail!("event loop exited with code {code} during window creation");
            }

            if let Some(created) = self.pump.created.take() {
                let window = created.context("native window creation failed")?;
                log::debug!("native window {:?} created", window.id());
                return Ok(WinitWindow {
                    window,
                    gpu: None,
                    frame: None,
                    close_requested: false,
                });
            }
        }

        self.pump.pending = None;
        bail!("window was not created after {CREATE_PUMP_ATTEMPTS} event pumps")
    }

    fn window_size(&self, window: &WinitWindow) -> Extent {
        let size = window.window.inner_size();
        Extent::new(size.width, size.height)
    }

    fn primary_display_size(&self, window: &WinitWindow) -> Option<Extent> {
        // Wayland does not expose a primary monitor; fall back to the current one.
        let monitor = window
            .window
            .primary_monitor()
            .or_else(|| window.window.current_monitor())?;
        let size = monitor.size();
        Some(Extent::new(size.width, size.height))
    }

    fn set_window_position(&mut self, window: &mut WinitWindow, position: Position) {
        window
            .window
            .set_outer_position(PhysicalPosition::new(position.x, position.y));
    }

    fn make_context_current(&mut self, window: &mut WinitWindow) -> Result<()> {
        let gpu = pollster::block_on(Gpu::new(window.window.clone(), self.gpu_init.clone()))?;

        let info = gpu.adapter_info();
        log::info!("graphics context on {} ({:?})", info.name, info.backend);

        window.gpu = Some(gpu);
        Ok(())
    }

    fn set_swap_interval(&mut self, window: &mut WinitWindow, interval: u32) {
        if let Some(gpu) = window.gpu.as_mut() {
            gpu.set_swap_interval(interval);
        }
    }

    fn show_window(&mut self, window: &mut WinitWindow) {
        window.window.set_visible(true);
    }

    fn load_graphics(&mut self, window: &mut WinitWindow) {
        if let Some(gpu) = window.gpu.as_mut() {
            gpu.create_depth_buffer();
            log::debug!("surface format {:?}, size {:?}", gpu.surface_format(), gpu.size());
        }
    }

    fn set_clear_color(&mut self, window: &mut WinitWindow, color: ClearColor) {
        if let Some(gpu) = window.gpu.as_mut() {
            gpu.set_clear_color(color);
        }
    }

    fn should_close(&self, window: &WinitWindow) -> bool {
        window.close_requested
    }

    fn clear(&mut self, window: &mut WinitWindow) {
        let Some(gpu) = window.gpu.as_mut() else {
            return;
        };
        if window.frame.is_some() || gpu.size().is_empty() {
            return;
        }

        match gpu.begin_frame() {
            Ok(frame) => window.frame = Some(frame),
            Err(err) => match gpu.handle_surface_error(err) {
                SurfaceErrorAction::Fatal => {
                    log::error!("surface is unusable, closing window");
                    window.close_requested = true;
                }
                action => log::debug!("frame skipped: {action:?}"),
            },
        }
    }

    fn swap_buffers(&mut self, window: &mut WinitWindow) {
        if let (Some(gpu), Some(frame)) = (window.gpu.as_ref(), window.frame.take()) {
            gpu.submit(frame, &window.window);
        }
    }

    fn poll_events(&mut self, window: &mut WinitWindow, input: &mut Input) {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return;
        };

        if let PumpStatus::Exit(code) =
            event_loop.pump_app_events(Some(Duration::ZERO), &mut self.pump)
        {
            log::debug!("event loop exited with code {code}");
            window.close_requested = true;
        }

        let id = window.window.id();
        for (event_id, event) in self.pump.events.drain(..) {
            if event_id != id {
                continue;
            }

            match &event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    window.close_requested = true;
                }
                _ => {}
            }

            if let Some(ev) = translate_window_event(&event) {
                if let (InputEvent::Resized(size), Some(gpu)) = (&ev, window.gpu.as_mut()) {
                    gpu.resize(*size);
                }
                input.apply_event(ev);
            }
        }
    }

    fn release_callbacks(&mut self, _window: &mut WinitWindow) {
        self.pump.pending = None;
        self.pump.created = None;
        self.pump.events.clear();
    }

    fn destroy_window(&mut self, window: WinitWindow) {
        let WinitWindow {
            window, gpu, frame, ..
        } = window;

        // Surface objects go before the window they were created from.
        drop(frame);
        drop(gpu);
        log::debug!("native window {:?} destroyed", window.id());
        drop(window);
    }

    fn terminate(&mut self) {
        // winit refuses to build a second event loop in one process, so a
        // terminated platform cannot be initialized again.
        self.event_loop = None;
        self.hints = None;
    }
}
