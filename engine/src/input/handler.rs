//! Input Handler
//!
//! Turns raw key and mouse events into per-frame action state. Events arrive
//! from the window loop between frames; [`ActionInput::end_frame`] clears the
//! edge flags and the accumulated mouse delta once the frame has consumed them.

use std::collections::HashMap;

use glam::Vec2;
use winit::keyboard::KeyCode;

use super::bindings::KeyBindings;
use super::{InputAction, InputSource};

/// State of a key (pressed or released)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl KeyState {
    fn set(&mut self, pressed: bool) {
        self.just_pressed |= pressed && !self.pressed;
        self.just_released |= !pressed && self.pressed;
        self.pressed = pressed;
    }

    fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Binding-backed [`InputSource`].
#[derive(Debug, Clone, Default)]
pub struct ActionInput {
    bindings: KeyBindings,
    /// Action states mapped by InputAction
    actions: HashMap<InputAction, KeyState>,
    /// Mouse movement accumulated since the last end_frame
    mouse_delta: Vec2,
}

impl ActionInput {
    /// Input with the default key bindings.
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::new())
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            actions: HashMap::new(),
            mouse_delta: Vec2::ZERO,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Handle a key event. Unbound keys are ignored.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(action) = self.bindings.get_action(key) {
            self.set_action(action, pressed);
        }
    }

    /// Drive an action directly, bypassing the key bindings.
    ///
    /// Repeated presses without a release do not produce a second edge.
    pub fn set_action(&mut self, action: InputAction, pressed: bool) {
        self.actions.entry(action).or_default().set(pressed);
    }

    pub fn press(&mut self, action: InputAction) {
        self.set_action(action, true);
    }

    pub fn release(&mut self, action: InputAction) {
        self.set_action(action, false);
    }

    /// Handle raw mouse movement (for camera control)
    pub fn handle_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.mouse_delta += Vec2::new(dx, dy);
    }

    /// Clear per-frame state (call at end of frame)
    pub fn end_frame(&mut self) {
        for state in self.actions.values_mut() {
            state.clear_edges();
        }
        self.mouse_delta = Vec2::ZERO;
    }

    /// Release every action, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        for state in self.actions.values_mut() {
            state.set(false);
        }
    }

    pub fn action_state(&self, action: InputAction) -> KeyState {
        self.actions.get(&action).copied().unwrap_or_default()
    }
}

impl InputSource for ActionInput {
    fn is_down(&self, action: InputAction) -> bool {
        self.action_state(action).pressed
    }

    fn is_pressed(&self, action: InputAction) -> bool {
        self.action_state(action).just_pressed
    }

    fn is_released(&self, action: InputAction) -> bool {
        self.action_state(action).just_released
    }

    fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}
