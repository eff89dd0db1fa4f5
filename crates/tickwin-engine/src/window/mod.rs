//! Window driver and frame loop.
//!
//! `Window` owns the configuration and the native handle, runs the one-time
//! setup sequence against a `Platform`, loops until the window is closed and
//! tears everything down again.

mod center;
mod config;
mod driver;
mod error;

pub use center::centered_position;
pub use config::{WindowConfig, DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH};
pub use driver::{DriverState, Window};
pub use error::{exit_on_error, InitError};
