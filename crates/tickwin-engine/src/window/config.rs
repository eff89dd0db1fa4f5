pub const DEFAULT_WIDTH: u32 = 1080;
pub const DEFAULT_HEIGHT: u32 = 720;
pub const DEFAULT_TITLE: &str = "tickwin";

/// Window configuration, fixed once the driver is constructed.
///
/// Width and height are in logical pixels; the platform scales them for the
/// display it opens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Borderless fullscreen on the monitor the window opens on.
    pub fullscreen: bool,
    pub resizable: bool,
    pub vsync: bool,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl WindowConfig {
    /// Windowed, fixed-size, no vsync, default title.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fullscreen: false,
            resizable: false,
            vsync: false,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Shorthand for `new(width, height).fullscreen(fullscreen)`.
    pub fn with_fullscreen(width: u32, height: u32, fullscreen: bool) -> Self {
        Self::new(width, height).fullscreen(fullscreen)
    }

    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Swap interval implied by `vsync`.
    pub fn swap_interval(&self) -> u32 {
        if self.vsync { 1 } else { 0 }
    }
}
