//! Collision primitives
//!
//! Ray queries against axis-aligned boxes, shared by the static collision
//! world and the kinematic body.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use flap_jumping_engine::physics::collision::{ray_aabb_intersect, Aabb};
//! use glam::Vec3;
//!
//! let origin = Vec3::new(0.0, 0.0, -5.0);
//! let direction = Vec3::new(0.0, 0.0, 1.0);
//! let wall = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
//!
//! if let Some(t) = ray_aabb_intersect(origin, direction, wall.min, wall.max) {
//!     let hit_point = origin + direction * t;
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::surface::SurfaceKind;

/// Result of a ray cast that hit something.
///
/// A miss is `None` at the call site; it is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space position where the ray hit
    pub position: Vec3,
    /// Surface normal at the hit point (normalized)
    pub normal: Vec3,
    /// Distance from ray origin to hit point
    pub distance: f32,
    /// Material of the surface that was hit
    pub surface: SurfaceKind,
}

impl RayHit {
    /// Creates a new RayHit with the given parameters.
    pub fn new(position: Vec3, normal: Vec3, distance: f32, surface: SurfaceKind) -> Self {
        Self {
            position,
            normal,
            distance,
            surface,
        }
    }
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Strict containment (points on a face are outside).
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpgt(self.min).all() && point.cmplt(self.max).all()
    }

    /// Strict overlap test (touching faces do not overlap).
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Smallest translation that moves `self` out of `other`, if they overlap.
    ///
    /// Returns the push vector along the axis of least penetration.
    pub fn penetration(&self, other: &Aabb) -> Option<Vec3> {
        if !self.intersects(other) {
            return None;
        }

        let push_pos = other.max - self.min;
        let push_neg = self.max - other.min;

        let candidates = [
            Vec3::new(push_pos.x, 0.0, 0.0),
            Vec3::new(-push_neg.x, 0.0, 0.0),
            Vec3::new(0.0, push_pos.y, 0.0),
            Vec3::new(0.0, -push_neg.y, 0.0),
            Vec3::new(0.0, 0.0, push_pos.z),
            Vec3::new(0.0, 0.0, -push_neg.z),
        ];

        candidates
            .into_iter()
            .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
    }
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// The slab method works by finding the intersection of the ray with each pair of
/// axis-aligned planes that make up the AABB. If the ray enters and exits the AABB
/// at valid times (t_enter < t_exit and t_exit > 0), there is an intersection.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero direction components get a huge inverse so the slab never bounds t
    let inv_dir = Vec3::new(
        safe_inverse(ray_dir.x),
        safe_inverse(ray_dir.y),
        safe_inverse(ray_dir.z),
    );

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

fn safe_inverse(component: f32) -> f32 {
    if component.abs() > 1e-10 {
        1.0 / component
    } else if component.is_sign_negative() {
        f32::MIN
    } else {
        f32::MAX
    }
}

/// Computes the surface normal for a point on an AABB surface.
///
/// Determines which face of the AABB the point is on and returns the outward normal.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(1e-6));
    let normalized = (point - center) / half_extents;

    // Closest face has the largest normalized coordinate
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.x && abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}
