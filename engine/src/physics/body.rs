//! Kinematic character body
//!
//! Reference [`CharacterBody`] for a [`StaticWorld`]: an upright box whose
//! feet sit at `position`. Acceleration and friction follow the classic
//! Quake/Source ground-movement formulas; collisions are resolved by pushing
//! the box out along the axis of least penetration and clipping velocity
//! against the contact normal.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::world::StaticWorld;
use super::{CharacterBody, PLAYER_TAG};
use crate::config::{ConfigError, check_non_negative};

/// Below this speed friction stops the body outright.
const MIN_FRICTION_SPEED: f32 = 0.1;

/// How far below the feet a surface still counts as ground.
const GROUND_PROBE: f32 = 0.05;

/// Shape and friction tuning for a [`KinematicBody`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Half-width of the collision box on X and Z
    pub radius: f32,
    /// Standing height of the collision box
    pub height: f32,
    /// Friction treats speeds below this as this, so slow bodies stop quickly
    pub stop_speed: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            radius: 16.0,
            height: 72.0,
            stop_speed: 100.0,
        }
    }
}

impl BodyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("body.radius", self.radius), ("body.height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
            }
        }
        check_non_negative("body.stop_speed", self.stop_speed)
    }
}

/// Box-shaped character body moving through a [`StaticWorld`].
#[derive(Debug, Clone)]
pub struct KinematicBody {
    config: BodyConfig,
    world: Arc<StaticWorld>,
    position: Vec3,
    velocity: Vec3,
    height: f32,
    grounded: bool,
}

impl KinematicBody {
    pub fn new(world: Arc<StaticWorld>, config: BodyConfig) -> Self {
        Self {
            height: config.height,
            config,
            world,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            grounded: false,
        }
    }

    /// Place the body and refresh its grounded state without moving it.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.teleport(position);
        self
    }

    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.grounded = self.probe_ground();
    }

    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    fn bounds_at(&self, feet: Vec3) -> Aabb {
        let r = self.config.radius;
        Aabb::new(
            feet - Vec3::new(r, 0.0, r),
            feet + Vec3::new(r, self.height, r),
        )
    }

    fn probe_ground(&self) -> bool {
        self.support_height().is_some()
    }

    /// Height of the highest walkable surface within `GROUND_PROBE` below the feet.
    fn support_height(&self) -> Option<f32> {
        let feet = self.position;

        let plane = self
            .world
            .ground_height()
            .filter(|ground| feet.y <= ground + GROUND_PROBE);

        let r = self.config.radius;
        let probe = Aabb::new(
            feet - Vec3::new(r, GROUND_PROBE, r),
            feet + Vec3::new(r, 0.0, r),
        );
        let top = self
            .world
            .boxes()
            .iter()
            .filter(|b| !b.has_tag(PLAYER_TAG))
            .filter(|b| b.bounds.max.y <= feet.y + GROUND_PROBE)
            .filter(|b| probe.intersects(&b.bounds))
            .map(|b| b.bounds.max.y)
            .reduce(f32::max);

        match (plane, top) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    /// Remove the component of velocity pointing into `normal`.
    fn clip_velocity(&mut self, normal: Vec3) {
        let into = self.velocity.dot(normal);
        if into < 0.0 {
            self.velocity -= normal * into;
        }
    }
}

impl CharacterBody for KinematicBody {
    fn is_on_ground(&self) -> bool {
        self.grounded
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    fn accelerate(&mut self, wish_velocity: Vec3, acceleration: f32, dt: f32) {
        let wish_speed = wish_velocity.length();
        if wish_speed < 1e-4 {
            return;
        }
        let wish_dir = wish_velocity / wish_speed;

        let current_speed = self.velocity.dot(wish_dir);
        let add_speed = wish_speed - current_speed;
        if add_speed <= 0.0 {
            return;
        }

        let accel_speed = (acceleration * dt * wish_speed).min(add_speed);
        self.velocity += wish_dir * accel_speed;
    }

    fn apply_friction(&mut self, friction: f32, dt: f32) {
        // Horizontal only so friction never fights gravity
        let horizontal = Vec3::new(self.velocity.x, 0.0, self.velocity.z);
        let speed = horizontal.length();
        if speed < MIN_FRICTION_SPEED {
            self.velocity.x = 0.0;
            self.velocity.z = 0.0;
            return;
        }

        let control = speed.max(self.config.stop_speed);
        let drop = control * friction * dt;
        let scale = (speed - drop).max(0.0) / speed;

        self.velocity.x *= scale;
        self.velocity.z *= scale;
    }

    fn move_and_slide(&mut self, dt: f32) {
        let mut position = self.position + self.velocity * dt;
        let world = Arc::clone(&self.world);

        if let Some(ground) = world.ground_height() {
            if position.y < ground {
                position.y = ground;
                self.clip_velocity(Vec3::Y);
            }
        }

        for world_box in world.boxes().iter().filter(|b| !b.has_tag(PLAYER_TAG)) {
            let Some(push) = self.bounds_at(position).penetration(&world_box.bounds) else {
                continue;
            };
            position += push;
            self.clip_velocity(push.normalize_or_zero());
        }

        self.position = position;

        // Feet hovering just above a surface settle onto it
        let support = if self.velocity.y <= 0.0 {
            self.support_height()
        } else {
            None
        };
        if let Some(height) = support {
            self.position.y = height;
            self.velocity.y = 0.0;
        }
        self.grounded = support.is_some();
    }

    fn punch(&mut self, impulse: Vec3) {
        self.velocity += impulse;
        self.grounded = false;
    }
}
