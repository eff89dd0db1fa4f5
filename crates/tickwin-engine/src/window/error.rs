use std::time::Duration;

use thiserror::Error;

/// Why `Window::start` could not bring a window up.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to initialize the windowing library: {0}")]
    LibraryInit(String),

    #[error("failed to create window: {0}")]
    WindowCreation(String),

    #[error("failed to create graphics context: {0}")]
    GraphicsContext(String),

    #[error("window driver was already started")]
    AlreadyStarted,
}

impl InitError {
    /// Process exit code for the fail-fast policy.
    pub fn exit_code(&self) -> i32 {
        match self {
            InitError::LibraryInit(_) => -1,
            InitError::WindowCreation(_) => -2,
            InitError::GraphicsContext(_) => -3,
            InitError::AlreadyStarted => 1,
        }
    }
}

/// Pause before exiting so the log sink can flush.
const EXIT_GRACE: Duration = Duration::from_secs(1);

/// Logs `err`, waits briefly and terminates the process with its exit code.
pub fn exit_on_error(err: InitError) -> ! {
    log::error!("{err}, shutting down");
    log::logger().flush();
    std::thread::sleep(EXIT_GRACE);
    std::process::exit(err.exit_code())
}
