//! Input Module
//!
//! The controller reads input through [`InputSource`]: digital actions with
//! held / pressed-this-frame / released-this-frame queries plus the mouse
//! delta accumulated since the last frame. [`ActionInput`] is the stock
//! implementation fed from winit key codes.
//!
//! # Example
//!
//! ```rust,ignore
//! use flap_jumping_engine::input::{ActionInput, InputAction, InputSource};
//! use winit::keyboard::KeyCode;
//!
//! let mut input = ActionInput::new();
//!
//! // Event loop
//! input.handle_key(KeyCode::KeyW, true);
//! input.handle_mouse_delta(4.0, -2.0);
//!
//! // Update
//! assert!(input.is_down(InputAction::Forward));
//! actor.on_frame(dt, &input, &world);
//!
//! // After the frame has been simulated
//! input.end_frame();
//! ```

pub mod bindings;
pub mod handler;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use bindings::KeyBindings;
pub use handler::{ActionInput, KeyState};

/// Logical actions the controller responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move along the head's forward direction (default: W)
    Forward,
    /// Move backward (default: S)
    Backward,
    /// Strafe left (default: A)
    Left,
    /// Strafe right (default: D)
    Right,
    /// Sprint while held (default: Left Shift)
    Run,
    /// Jump on press (default: Space)
    Jump,
    /// Crouch while held (default: Left Ctrl)
    Crouch,
}

impl InputAction {
    pub const ALL: [InputAction; 7] = [
        InputAction::Forward,
        InputAction::Backward,
        InputAction::Left,
        InputAction::Right,
        InputAction::Run,
        InputAction::Jump,
        InputAction::Crouch,
    ];
}

/// Digital action and mouse input for one frame.
pub trait InputSource {
    /// Action is currently held.
    fn is_down(&self, action: InputAction) -> bool;

    /// Action went down this frame.
    fn is_pressed(&self, action: InputAction) -> bool;

    /// Action went up this frame.
    fn is_released(&self, action: InputAction) -> bool;

    /// Mouse motion since the previous frame, +X right and +Y down.
    fn mouse_delta(&self) -> Vec2;
}
