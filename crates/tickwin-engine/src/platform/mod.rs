//! Native windowing seam.
//!
//! `Platform` is the narrow surface the window driver needs from a windowing
//! and graphics library. The driver owns the window handle and passes it back
//! on every call; the platform owns everything else.

mod winit;

use std::time::Duration;

use anyhow::Result;

use crate::coords::{Extent, Position};
use crate::device::ClearColor;
use crate::input::Input;
use crate::window::WindowConfig;

pub use self::winit::WinitPlatform;

/// Graphics context request applied at window creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ContextHints {
    pub major: u8,
    pub minor: u8,
    pub core_profile: bool,
    pub forward_compat: bool,
}

impl Default for ContextHints {
    fn default() -> Self {
        Self {
            major: 3,
            minor: 2,
            core_profile: true,
            forward_compat: true,
        }
    }
}

/// Pre-creation flags consumed by `Platform::create_window`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WindowHints {
    pub visible: bool,
    pub resizable: bool,
    pub fullscreen: bool,
    pub context: ContextHints,
}

impl WindowHints {
    /// Hints for a window that stays hidden until setup completes.
    pub fn for_config(config: &WindowConfig) -> Self {
        Self {
            visible: false,
            resizable: config.resizable,
            fullscreen: config.fullscreen,
            context: ContextHints::default(),
        }
    }
}

/// Windowing and graphics library operations used by the driver.
///
/// Only `init`, `create_window` and `make_context_current` may fail; every
/// other call is assumed to succeed.
pub trait Platform {
    /// Opaque native window, owned by the driver between creation and teardown.
    type Window;

    /// Initializes the library. Called once per `start`.
    fn init(&mut self) -> Result<()>;

    /// Monotonic time since `init`.
    fn elapsed(&self) -> Duration;

    fn apply_hints(&mut self, hints: &WindowHints);

    fn create_window(&mut self, config: &WindowConfig) -> Result<Self::Window>;

    /// Current content size of the window.
    fn window_size(&self, window: &Self::Window) -> Extent;

    /// Video mode size of the primary display, if one is reported.
    fn primary_display_size(&self, window: &Self::Window) -> Option<Extent>;

    fn set_window_position(&mut self, window: &mut Self::Window, position: Position);

    /// Creates and binds the graphics context for `window`.
    fn make_context_current(&mut self, window: &mut Self::Window) -> Result<()>;

    /// 0 presents immediately, 1 waits for vertical sync.
    fn set_swap_interval(&mut self, window: &mut Self::Window, interval: u32);

    fn show_window(&mut self, window: &mut Self::Window);

    /// Prepares graphics resources that depend on the bound context.
    fn load_graphics(&mut self, window: &mut Self::Window);

    fn set_clear_color(&mut self, window: &mut Self::Window, color: ClearColor);

    fn should_close(&self, window: &Self::Window) -> bool;

    /// Clears color and depth of the next frame.
    fn clear(&mut self, window: &mut Self::Window);

    /// Presents the frame started by `clear`.
    fn swap_buffers(&mut self, window: &mut Self::Window);

    /// Processes pending OS events, feeding input events into `input`.
    fn poll_events(&mut self, window: &mut Self::Window, input: &mut Input);

    /// Drops event routing registered for `window`.
    fn release_callbacks(&mut self, window: &mut Self::Window);

    fn destroy_window(&mut self, window: Self::Window);

    /// Shuts the library down. Counterpart of `init`.
    fn terminate(&mut self);
}
