//! Player Module
//!
//! Character locomotion driven through the physics collaborators.
//!
//! # Components
//!
//! - [`MotionController`] - Head-relative WASD movement with ground/air integration
//!   - Edge-triggered crouch, sprint, grounded-only jump
//!   - Procedural body yaw, footstep cadence, animation parameter publishing
//! - [`CrouchState`] - Stance toggling that halves/doubles the collision height
//! - [`FootstepTimer`] / [`Gait`] - Footstep cadence
//! - [`BodyTurn`] - Lagging body yaw

pub mod body_turn;
pub mod crouch;
pub mod footsteps;
pub mod motion_controller;

pub use body_turn::{BodyTurn, yaw_only};
pub use crouch::{CrouchState, Stance};
pub use footsteps::{FootstepTimer, Gait};
pub use motion_controller::{ActorPose, MotionController, MotionState, wish_velocity};
