//! Time subsystem.
//!
//! Frame timing utilities that stay independent of the platform:
//! - `FrameClock` turns monotonic timestamps into per-frame deltas
//! - `TickAccumulator` decides when the lower-frequency tick fires

mod frame_clock;
mod tick;

pub use frame_clock::{FrameClock, FrameTime};
pub use tick::{TickAccumulator, TICK_THRESHOLD};
