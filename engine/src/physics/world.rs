//! Static collision world
//!
//! A minimal [`PhysicsWorld`]: an optional infinite ground plane plus a list
//! of tagged axis-aligned boxes. Queries are brute force, which is fine for
//! test arenas and the headless driver.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::PhysicsWorld;
use super::collision::{Aabb, RayHit, aabb_surface_normal, ray_aabb_intersect};
use super::surface::SurfaceKind;

/// Default world gravity (engine units per second squared).
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -800.0, 0.0);

/// Rays shorter than this never hit anything.
const MIN_RAY_LENGTH: f32 = 1e-5;

/// A solid box in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldBox {
    pub bounds: Aabb,
    pub surface: SurfaceKind,
    /// Tags used for ray-cast filtering (e.g. `"player"`).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl WorldBox {
    pub fn new(bounds: Aabb, surface: SurfaceKind) -> Self {
        Self {
            bounds,
            surface,
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|own| own == tag)
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|own| tags.contains(own))
    }
}

/// Ground plane plus static boxes.
///
/// Shared read-only between bodies through an `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticWorld {
    gravity: Vec3,
    /// Height of the infinite ground plane, if any
    ground_height: Option<f32>,
    ground_surface: SurfaceKind,
    boxes: Vec<WorldBox>,
}

static_assertions::assert_impl_all!(StaticWorld: Send, Sync);

impl Default for StaticWorld {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            ground_height: Some(0.0),
            ground_surface: SurfaceKind::Default,
            boxes: Vec::new(),
        }
    }
}

impl StaticWorld {
    /// Flat world with a ground plane at Y=0.
    pub fn new() -> Self {
        Self::default()
    }

    /// World with no ground plane and no boxes.
    pub fn empty() -> Self {
        Self {
            ground_height: None,
            ..Default::default()
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_ground(mut self, height: f32, surface: SurfaceKind) -> Self {
        self.ground_height = Some(height);
        self.ground_surface = surface;
        self
    }

    pub fn with_box(mut self, world_box: WorldBox) -> Self {
        self.boxes.push(world_box);
        self
    }

    pub fn ground_height(&self) -> Option<f32> {
        self.ground_height
    }

    pub fn ground_surface(&self) -> SurfaceKind {
        self.ground_surface
    }

    pub fn boxes(&self) -> &[WorldBox] {
        &self.boxes
    }

    fn ray_cast_ground(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit> {
        let ground = self.ground_height?;

        // The plane is one-sided: only rays coming down from above hit it
        if dir.y >= -1e-6 || origin.y < ground {
            return None;
        }

        let t = (ground - origin.y) / dir.y;
        (0.0..=max_dist).contains(&t).then(|| {
            RayHit::new(origin + dir * t, Vec3::Y, t, self.ground_surface)
        })
    }
}

impl PhysicsWorld for StaticWorld {
    fn gravity(&self) -> Vec3 {
        self.gravity
    }

    fn ray_cast(&self, from: Vec3, to: Vec3, ignore_tags: &[String]) -> Option<RayHit> {
        let delta = to - from;
        let max_dist = delta.length();
        if max_dist < MIN_RAY_LENGTH {
            return None;
        }
        let dir = delta / max_dist;

        let mut closest = self.ray_cast_ground(from, dir, max_dist);
        let mut closest_dist = closest.map_or(max_dist, |hit| hit.distance);

        for world_box in self.boxes.iter().filter(|b| !b.has_any_tag(ignore_tags)) {
            // Starting inside a solid blocks the ray immediately
            if world_box.bounds.contains_point(from) {
                return Some(RayHit::new(from, -dir, 0.0, world_box.surface));
            }

            let Aabb { min, max } = world_box.bounds;
            if let Some(t) = ray_aabb_intersect(from, dir, min, max) {
                if t <= closest_dist {
                    let position = from + dir * t;
                    closest = Some(RayHit::new(
                        position,
                        aabb_surface_normal(position, min, max),
                        t,
                        world_box.surface,
                    ));
                    closest_dist = t;
                }
            }
        }

        closest
    }
}
