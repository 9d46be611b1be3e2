//! Camera Rig
//!
//! Places the view camera relative to the player's head. Distance zero is
//! first person: the camera sits at the head (plus the smoothed crouch
//! offset) and the body mesh only casts shadows. Any positive distance is
//! third person: the camera backs away from the head along the view
//! direction and is pulled in when something blocks the way.
//!
//! The mode is never stored; it is derived from the distance every frame.
//!
//! # Update Order
//!
//! ```rust,ignore
//! rig.update_head(&input);                       // before motion reads the head
//! motion.on_frame(dt, &input, rig.head().rotation(), &world);
//! rig.update_placement(dt, motion.is_crouching(), motion.position(), &world);
//! ```

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::head::HeadOrientation;
use crate::config::CameraConfig;
use crate::input::InputSource;
use crate::physics::PhysicsWorld;
use crate::render::{BodyRenderer, ShadowRenderMode};

/// Camera mode - derived from the third-person distance
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CameraMode {
    /// Camera at the head, body mesh shadow-only
    FirstPerson,
    /// Camera behind the head, body mesh visible
    ThirdPerson,
}

impl CameraMode {
    pub fn from_distance(distance: f32) -> Self {
        if distance == 0.0 {
            CameraMode::FirstPerson
        } else {
            CameraMode::ThirdPerson
        }
    }
}

/// Final camera placement for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Per-actor camera state.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub head: HeadOrientation,
    /// Smoothed crouch offset added to the head position
    pub current_offset: Vec3,
    /// Zero means first person
    pub third_person_distance: f32,
}

impl CameraState {
    pub fn is_first_person(&self) -> bool {
        self.third_person_distance == 0.0
    }

    pub fn mode(&self) -> CameraMode {
        CameraMode::from_distance(self.third_person_distance)
    }
}

/// Head look, crouch offset smoothing and camera placement.
pub struct CameraRig {
    config: CameraConfig,
    state: CameraState,
    /// Whether a view camera is attached. Without one, placement is skipped.
    camera_attached: bool,
    body_renderer: Option<Box<dyn BodyRenderer>>,
    transform: Option<CameraTransform>,
    /// Mode applied on the previous placement, for change logging
    last_mode: Option<CameraMode>,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        let state = CameraState {
            head: HeadOrientation::new(config.pitch_limit_deg),
            current_offset: Vec3::ZERO,
            third_person_distance: config.third_person_distance.max(0.0),
        };
        Self {
            config,
            state,
            camera_attached: true,
            body_renderer: None,
            transform: None,
            last_mode: None,
        }
    }

    pub fn with_body_renderer(mut self, renderer: Box<dyn BodyRenderer>) -> Self {
        self.body_renderer = Some(renderer);
        self
    }

    /// Rig that tracks the head but never places a camera.
    pub fn without_camera(mut self) -> Self {
        self.camera_attached = false;
        self
    }

    pub fn set_body_renderer(&mut self, renderer: Option<Box<dyn BodyRenderer>>) {
        self.body_renderer = renderer;
    }

    pub fn set_camera_attached(&mut self, attached: bool) {
        self.camera_attached = attached;
        if !attached {
            self.transform = None;
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn head(&self) -> &HeadOrientation {
        &self.state.head
    }

    pub fn head_mut(&mut self) -> &mut HeadOrientation {
        &mut self.state.head
    }

    pub fn current_offset(&self) -> Vec3 {
        self.state.current_offset
    }

    pub fn third_person_distance(&self) -> f32 {
        self.state.third_person_distance
    }

    /// Change the third-person distance. Zero switches to first person on
    /// the next placement; negative values are treated as zero.
    pub fn set_third_person_distance(&mut self, distance: f32) {
        self.state.third_person_distance = if distance.is_finite() {
            distance.max(0.0)
        } else {
            0.0
        };
    }

    pub fn is_first_person(&self) -> bool {
        self.state.is_first_person()
    }

    pub fn mode(&self) -> CameraMode {
        self.state.mode()
    }

    /// Camera placement from the last update, `None` without a camera.
    pub fn transform(&self) -> Option<CameraTransform> {
        self.transform
    }

    /// Head position for an actor standing at `actor_position`.
    pub fn head_position(&self, actor_position: Vec3) -> Vec3 {
        actor_position + Vec3::Y * self.config.eye_height
    }

    /// Apply this frame's mouse delta to the head.
    pub fn update_head(&mut self, input: &dyn InputSource) {
        self.state
            .head
            .apply_mouse_delta(input.mouse_delta(), self.config.sensitivity);
    }

    /// Smooth the crouch offset and place the camera.
    pub fn update_placement(
        &mut self,
        dt: f32,
        crouching: bool,
        actor_position: Vec3,
        world: &dyn PhysicsWorld,
    ) {
        self.update_offset(dt, crouching);

        if !self.camera_attached {
            self.transform = None;
            return;
        }

        let mode = self.mode();
        if self.last_mode != Some(mode) {
            debug!(?mode, distance = self.state.third_person_distance, "camera mode");
            self.last_mode = Some(mode);
        }

        let candidate = self.head_position(actor_position) + self.state.current_offset;
        let rotation = self.state.head.rotation();

        let position = match mode {
            CameraMode::FirstPerson => {
                self.set_body_shadow_mode(ShadowRenderMode::ShadowsOnly);
                candidate
            }
            CameraMode::ThirdPerson => {
                self.set_body_shadow_mode(ShadowRenderMode::On);
                self.occluded_position(candidate, world)
            }
        };

        self.transform = Some(CameraTransform { position, rotation });
    }

    /// Head, offset and placement in one call.
    pub fn on_frame(
        &mut self,
        dt: f32,
        input: &dyn InputSource,
        crouching: bool,
        actor_position: Vec3,
        world: &dyn PhysicsWorld,
    ) {
        self.update_head(input);
        self.update_placement(dt, crouching, actor_position, world);
    }

    fn update_offset(&mut self, dt: f32, crouching: bool) {
        let target = if crouching {
            Vec3::NEG_Y * self.config.crouch_offset
        } else {
            Vec3::ZERO
        };
        let t = (dt * self.config.offset_smoothing).clamp(0.0, 1.0);
        self.state.current_offset = self.state.current_offset.lerp(target, t);
    }

    /// Third-person position: `distance` behind `candidate`, pulled in to the
    /// first obstruction (less the collision skin, never past the hit).
    fn occluded_position(&self, candidate: Vec3, world: &dyn PhysicsWorld) -> Vec3 {
        let back = -self.state.head.forward();
        let distance = self.state.third_person_distance;
        let end = candidate + back * distance;

        match world.ray_cast(candidate, end, &self.config.ignore_tags) {
            Some(hit) => {
                let pulled = (hit.distance - self.config.collision_skin).max(0.0);
                candidate + back * pulled.min(distance)
            }
            None => end,
        }
    }

    fn set_body_shadow_mode(&mut self, mode: ShadowRenderMode) {
        if let Some(renderer) = self.body_renderer.as_deref_mut() {
            renderer.set_shadow_mode(mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::StaticWorld;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_mode_from_distance() {
        assert_eq!(CameraMode::from_distance(0.0), CameraMode::FirstPerson);
        assert_eq!(CameraMode::from_distance(0.5), CameraMode::ThirdPerson);
    }

    #[test]
    fn test_first_person_at_head() {
        let world = StaticWorld::new();
        let mut rig = CameraRig::new(CameraConfig::default());

        rig.update_placement(DT, false, Vec3::new(10.0, 0.0, 5.0), &world);

        let transform = rig.transform().expect("camera attached");
        assert_eq!(transform.position, Vec3::new(10.0, 64.0, 5.0));
        assert_eq!(transform.rotation, rig.head().rotation());
    }

    #[test]
    fn test_negative_distance_clamped() {
        let mut rig = CameraRig::new(CameraConfig::default());
        rig.set_third_person_distance(-20.0);
        assert!(rig.is_first_person());

        rig.set_third_person_distance(f32::INFINITY);
        assert!(rig.is_first_person());
    }

    #[test]
    fn test_without_camera_has_no_transform() {
        let world = StaticWorld::new();
        let mut rig = CameraRig::new(CameraConfig::default()).without_camera();

        rig.update_placement(DT, true, Vec3::ZERO, &world);

        assert!(rig.transform().is_none());
        // Offset still smooths
        assert!(rig.current_offset().y < 0.0);
    }

    #[test]
    fn test_offset_converges_to_crouch_target() {
        let world = StaticWorld::new();
        let mut rig = CameraRig::new(CameraConfig::default());

        for _ in 0..600 {
            rig.update_placement(DT, true, Vec3::ZERO, &world);
        }
        assert!((rig.current_offset().y + 32.0).abs() < 0.01);
    }

    #[test]
    fn test_huge_dt_snaps_without_overshoot() {
        let world = StaticWorld::new();
        let mut rig = CameraRig::new(CameraConfig::default());

        rig.update_placement(10.0, true, Vec3::ZERO, &world);
        assert_eq!(rig.current_offset(), Vec3::new(0.0, -32.0, 0.0));
    }

    #[test]
    fn test_third_person_unobstructed() {
        let world = StaticWorld::empty();
        let mut rig = CameraRig::new(CameraConfig {
            third_person_distance: 100.0,
            ..Default::default()
        });

        rig.update_placement(DT, false, Vec3::ZERO, &world);

        let transform = rig.transform().expect("camera attached");
        // Looking toward -Z, so the camera backs off toward +Z
        assert!((transform.position - Vec3::new(0.0, 64.0, 100.0)).length() < 1e-3);
    }
}
