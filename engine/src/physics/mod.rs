//! Physics collaborators
//!
//! The controller does not own a physics solver. It talks to two
//! capabilities defined here:
//!
//! - [`CharacterBody`] - the player's collision volume: velocity, height,
//!   grounded state and the accelerate/friction/move primitives
//! - [`PhysicsWorld`] - read-only world queries: gravity and ray casts
//!
//! # Unit System
//!
//! Units are engine units (the defaults assume inches: walk speed 160,
//! gravity 800 downward). +Y is up.
//!
//! # Submodules
//!
//! - [`collision`] - Ray/AABB math and [`RayHit`]
//! - [`surface`] - Surface kinds and the footstep sound table
//! - [`world`] - [`StaticWorld`], a ground plane plus tagged boxes
//! - [`body`] - [`KinematicBody`], a reference swept-move character body

pub mod body;
pub mod collision;
pub mod surface;
pub mod world;

use glam::Vec3;

pub use body::{BodyConfig, KinematicBody};
pub use collision::{Aabb, RayHit, aabb_surface_normal, ray_aabb_intersect};
pub use surface::SurfaceKind;
pub use world::{StaticWorld, WorldBox};

/// Tag carried by the player's own collision volume.
pub const PLAYER_TAG: &str = "player";

/// The player's collision volume.
///
/// Velocity is owned by the body; the controller reads it, writes it, and
/// asks the body to integrate it.
pub trait CharacterBody {
    /// Whether the body currently rests on walkable ground.
    fn is_on_ground(&self) -> bool;

    /// World-space position of the body's feet.
    fn position(&self) -> Vec3;

    fn velocity(&self) -> Vec3;

    fn set_velocity(&mut self, velocity: Vec3);

    /// Collision height.
    fn height(&self) -> f32;

    fn set_height(&mut self, height: f32);

    /// Accelerate velocity toward `wish_velocity` at `acceleration` for `dt` seconds.
    fn accelerate(&mut self, wish_velocity: Vec3, acceleration: f32, dt: f32);

    /// Apply friction of strength `friction` for `dt` seconds.
    fn apply_friction(&mut self, friction: f32, dt: f32);

    /// Swept move along the current velocity for `dt` seconds, resolving collisions.
    fn move_and_slide(&mut self, dt: f32);

    /// Instantaneous impulse. Detaches the body from the ground.
    fn punch(&mut self, impulse: Vec3);
}

/// Read-only queries against the collision world.
pub trait PhysicsWorld {
    /// World gravity acceleration.
    fn gravity(&self) -> Vec3;

    /// Cast a ray from `from` to `to`, skipping anything tagged with one of
    /// `ignore_tags`. Returns the closest hit.
    fn ray_cast(&self, from: Vec3, to: Vec3, ignore_tags: &[String]) -> Option<RayHit>;
}
