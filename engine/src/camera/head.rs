//! Head Orientation
//!
//! Mouse-look state for the player's head. Mouse movement directly rotates
//! the head with no smoothing.
//!
//! Key features:
//! - Angles in degrees, sensitivity in degrees per mouse unit
//! - Pitch positive looks down, yaw positive turns left (mouse right turns right)
//! - Roll pinned to zero
//! - Pitch clamped after accumulation, so no input magnitude escapes the limit
//!
//! # Coordinate System
//! - +X = right
//! - +Y = up
//! - -Z = forward
//!
//! When yaw=0 and pitch=0, the head looks toward -Z.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Default pitch limit in degrees.
pub const DEFAULT_PITCH_LIMIT_DEG: f32 = 89.9;

// Looking straight up or down would make forward parallel to +Y
static_assertions::const_assert!(DEFAULT_PITCH_LIMIT_DEG > 0.0 && DEFAULT_PITCH_LIMIT_DEG < 90.0);

/// Head pitch/yaw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadOrientation {
    /// Vertical angle (degrees), positive looks down
    pitch: f32,
    /// Horizontal angle (degrees), wrapped to [-180, 180)
    yaw: f32,
    /// Pitch is clamped to +/- this many degrees
    pitch_limit: f32,
}

impl Default for HeadOrientation {
    fn default() -> Self {
        Self::new(DEFAULT_PITCH_LIMIT_DEG)
    }
}

impl HeadOrientation {
    pub fn new(pitch_limit_deg: f32) -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            pitch_limit: pitch_limit_deg.abs(),
        }
    }

    /// Orientation with the given angles (degrees). Pitch is clamped.
    pub fn from_angles(pitch_deg: f32, yaw_deg: f32, pitch_limit_deg: f32) -> Self {
        let mut head = Self::new(pitch_limit_deg);
        head.set_pitch(pitch_deg);
        head.set_yaw(yaw_deg);
        head
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the pitch (degrees, clamped to the limit)
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        // NaN survives clamp
        let pitch = if pitch.is_finite() { pitch } else { 0.0 };
        self.pitch = pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = if yaw.is_finite() { wrap_degrees(yaw) } else { 0.0 };
    }

    #[inline]
    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit
    }

    /// Apply a mouse delta scaled by `sensitivity` (degrees per unit).
    ///
    /// - Positive dx = mouse moved right = turn right (decrease yaw)
    /// - Positive dy = mouse moved down = look down (increase pitch)
    pub fn apply_mouse_delta(&mut self, delta: Vec2, sensitivity: f32) {
        self.set_pitch(self.pitch + delta.y * sensitivity);
        self.set_yaw(self.yaw - delta.x * sensitivity);
    }

    /// World rotation of the head.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians()) * Quat::from_rotation_x(-self.pitch.to_radians())
    }

    /// Direction the head is looking.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Perpendicular to forward, in the horizontal plane.
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Point the head from `from` toward `target`.
    pub fn look_at(&mut self, from: Vec3, target: Vec3) {
        let to_target = target - from;
        let distance = to_target.length();

        if distance > 0.001 {
            self.set_yaw((-to_target.x).atan2(-to_target.z).to_degrees());
            self.set_pitch((-to_target.y / distance).asin().to_degrees());
        }
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}
