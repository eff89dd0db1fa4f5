use std::collections::HashSet;

use crate::coords::Extent;
use crate::window::WindowConfig;

use super::event::{InputEvent, Key, Modifiers, MouseButton, PressState};

/// Input state for the driven window.
///
/// Holds "is down" information plus per-frame transitions. Transitions
/// collected while events are polled stay visible through the next
/// `on_update` and are cleared by `update`.
#[derive(Debug, Default)]
pub struct Input {
    window_size: Extent,
    focused: bool,
    modifiers: Modifiers,
    pointer_pos: Option<(f32, f32)>,

    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,

    keys_pressed: HashSet<Key>,
    keys_released: HashSet<Key>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    scroll: (f32, f32),
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the input state to a freshly created window.
    ///
    /// Drops anything left over from a previous window. The size taken from
    /// `config` is logical; the driver follows up with a `Resized` event
    /// carrying the physical content size.
    pub fn init(&mut self, config: &WindowConfig) {
        *self = Self {
            window_size: Extent::new(config.width, config.height),
            focused: true,
            ..Self::default()
        };
        log::debug!("input bound to {}x{} window", config.width, config.height);
    }

    /// Clears per-frame transitions. Called once per frame by the driver.
    pub fn update(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.scroll = (0.0, 0.0);
    }

    /// Folds one event into the current state and this frame's transitions.
    pub fn apply_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, state, repeat } => match state {
                PressState::Pressed => {
                    if self.keys_down.insert(key) && !repeat {
                        self.keys_pressed.insert(key);
                    }
                }
                PressState::Released => {
                    if self.keys_down.remove(&key) {
                        self.keys_released.insert(key);
                    }
                }
            },

            InputEvent::MouseButton { button, state } => match state {
                PressState::Pressed => {
                    if self.buttons_down.insert(button) {
                        self.buttons_pressed.insert(button);
                    }
                }
                PressState::Released => {
                    if self.buttons_down.remove(&button) {
                        self.buttons_released.insert(button);
                    }
                }
            },

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((x, y)),
            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Scroll { x, y } => {
                self.scroll.0 += x;
                self.scroll.1 += y;
            }

            InputEvent::ModifiersChanged(m) => self.modifiers = m,

            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are never delivered to an unfocused window.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::Resized(size) => self.window_size = size,
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// True only on the frame the key went down.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn pointer_pos(&self) -> Option<(f32, f32)> {
        self.pointer_pos
    }

    /// Scroll lines accumulated this frame.
    pub fn scroll(&self) -> (f32, f32) {
        self.scroll
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Current content size of the window.
    pub fn window_size(&self) -> Extent {
        self.window_size
    }
}
