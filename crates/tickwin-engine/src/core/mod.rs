//! Core engine-facing contracts.
//!
//! Defines the lifecycle interface between the window driver and user code.
//! Nothing in here depends on winit or wgpu.

mod engine;

pub use engine::Engine;
