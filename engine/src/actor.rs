//! Actor
//!
//! One player character: a [`MotionController`] and a [`CameraRig`] updated
//! in a fixed order. Each frame the head turns first, then the motion
//! controller reads the new head rotation, then the camera is placed from the
//! motion result. Fixed steps only touch the motion controller.

use glam::{Quat, Vec3};

use crate::animation::AnimationSink;
use crate::audio::AudioSink;
use crate::camera::{CameraMode, CameraRig, CameraTransform};
use crate::config::ControllerConfig;
use crate::input::InputSource;
use crate::physics::{CharacterBody, PhysicsWorld};
use crate::player::{MotionController, MotionState};
use crate::render::BodyRenderer;

/// A controllable first-person character.
pub struct Actor {
    motion: MotionController,
    rig: CameraRig,
}

impl Actor {
    pub fn new(config: &ControllerConfig) -> Self {
        Self::from_parts(
            MotionController::new(config.motion.clone()),
            CameraRig::new(config.camera.clone()),
        )
    }

    pub fn from_parts(motion: MotionController, rig: CameraRig) -> Self {
        Self { motion, rig }
    }

    pub fn with_body(mut self, body: Box<dyn CharacterBody>) -> Self {
        self.motion.set_body(Some(body));
        self
    }

    pub fn with_animation(mut self, animation: Box<dyn AnimationSink>) -> Self {
        self.motion.set_animation(Some(animation));
        self
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.motion.set_audio(Some(audio));
        self
    }

    pub fn with_body_renderer(mut self, renderer: Box<dyn BodyRenderer>) -> Self {
        self.rig.set_body_renderer(Some(renderer));
        self
    }

    /// Actor without a view camera (e.g. a remote or AI-driven character).
    pub fn without_camera(mut self) -> Self {
        self.rig.set_camera_attached(false);
        self
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionController {
        &mut self.motion
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    /// Per-frame update: head, then motion, then camera placement.
    pub fn on_frame(&mut self, dt: f32, input: &dyn InputSource, world: &dyn PhysicsWorld) {
        self.rig.update_head(input);
        self.motion
            .on_frame(dt, input, self.rig.head().rotation(), world);
        self.rig.update_placement(
            dt,
            self.motion.is_crouching(),
            self.motion.position(),
            world,
        );
    }

    /// Fixed-rate movement step.
    pub fn on_fixed_step(&mut self, dt: f32, input: &dyn InputSource, world: &dyn PhysicsWorld) {
        self.motion
            .on_fixed_step(dt, input, self.rig.head().rotation(), world);
    }

    /// Switch between first person (0) and third person (> 0) at any time.
    pub fn set_third_person_distance(&mut self, distance: f32) {
        self.rig.set_third_person_distance(distance);
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.rig.mode()
    }

    pub fn camera_transform(&self) -> Option<CameraTransform> {
        self.rig.transform()
    }

    pub fn position(&self) -> Vec3 {
        self.motion.position()
    }

    pub fn head_position(&self) -> Vec3 {
        self.rig.head_position(self.motion.position())
    }

    pub fn head_rotation(&self) -> Quat {
        self.rig.head().rotation()
    }

    pub fn motion_state(&self) -> MotionState {
        self.motion.state()
    }
}
