//! tickwin engine crate.
//!
//! Bootstraps a native window with a wgpu context and drives a single-threaded
//! frame loop that dispatches per-frame updates and threshold ticks to an
//! [`core::Engine`].

pub mod core;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod platform;
pub mod time;
pub mod window;
