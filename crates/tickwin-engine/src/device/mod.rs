//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue for a window
//! - configuring the Surface and the matching depth buffer
//! - recording the per-frame clear pass and presenting it

mod color;
mod error;
mod gpu;
mod surface;

pub use color::ClearColor;
pub use error::SurfaceErrorAction;
pub use gpu::{Gpu, GpuFrame, GpuInit};
