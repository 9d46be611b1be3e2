//! Procedural body yaw
//!
//! The visible body lags behind the head: it stays put while the player
//! stands still and looks around a little, and swings toward the head's yaw
//! once the head strays too far or the player starts moving.

use glam::{EulerRot, Quat};

/// Yaw-only rotation matching the head's heading.
pub fn yaw_only(head: Quat) -> Quat {
    let (yaw, _, _) = head.to_euler(EulerRot::YXZ);
    Quat::from_rotation_y(yaw)
}

/// Body turning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTurn {
    /// Angular distance (degrees) that forces a turn
    pub threshold_deg: f32,
    /// Speed above which the body always turns
    pub speed_threshold: f32,
    /// Slerp factor per second
    pub rate: f32,
}

impl BodyTurn {
    /// Next body rotation given the current one, the head rotation, the
    /// body's speed and the frame time.
    pub fn step(&self, body: Quat, head: Quat, speed: f32, dt: f32) -> Quat {
        let target = yaw_only(head);
        let distance_deg = body.angle_between(target).to_degrees();

        if distance_deg > self.threshold_deg || speed > self.speed_threshold {
            let t = (self.rate * dt).clamp(0.0, 1.0);
            body.slerp(target, t).normalize()
        } else {
            body
        }
    }
}
