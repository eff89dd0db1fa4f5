//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types. The
//! platform translates native events into `InputEvent`s and hands them to
//! `Input::apply_event`; the driver calls `Input::update` once per frame.

mod event;
mod state;

pub use event::{InputEvent, Key, MouseButton, Modifiers, PressState};
pub use state::Input;
