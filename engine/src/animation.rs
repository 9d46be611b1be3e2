//! Animation Sink
//!
//! Locomotion parameters are pushed one way into an animation graph every
//! frame. Nothing is read back; skeletal evaluation and blending live on the
//! other side of [`AnimationSink`].

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Locomotion style requested from the animation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveStyle {
    Auto,
    Walk,
    #[default]
    Run,
}

/// Blend weights for the look-at layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookWeights {
    /// Eye tracking weight
    pub eyes: f32,
    /// Head turn weight
    pub head: f32,
    /// Upper body twist weight
    pub body: f32,
}

impl Default for LookWeights {
    fn default() -> Self {
        Self {
            eyes: 1.0,
            head: 0.75,
            body: 0.5,
        }
    }
}

/// Receives locomotion parameters from the motion controller.
pub trait AnimationSink {
    /// Velocity the player is asking for this step.
    fn set_wish_velocity(&mut self, wish_velocity: Vec3);

    /// Actual body velocity.
    fn set_velocity(&mut self, velocity: Vec3);

    /// Aim rotation (head orientation).
    fn set_aim_rotation(&mut self, aim: Quat);

    /// Whether the body rests on walkable ground.
    fn set_grounded(&mut self, grounded: bool);

    /// Look direction and layer weights.
    fn set_look(&mut self, direction: Vec3, weights: LookWeights);

    /// Locomotion style.
    fn set_move_style(&mut self, style: MoveStyle);

    /// Crouch blend, 0.0 standing to 1.0 fully crouched.
    fn set_duck_level(&mut self, level: f32);

    /// One-shot jump event.
    fn trigger_jump(&mut self);
}
