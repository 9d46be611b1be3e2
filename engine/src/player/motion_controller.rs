//! Player Motion Controller
//!
//! Converts input into character movement through a [`CharacterBody`].
//! Movement direction is relative to the head's facing direction.
//!
//! # Update Model
//!
//! Two entry points, both driven by the host:
//!
//! - [`MotionController::on_frame`] once per rendered frame: crouch edges,
//!   sprint flag, jump, body yaw smoothing, animation parameters, footsteps
//! - [`MotionController::on_fixed_step`] zero or more times per frame: wish
//!   velocity and the ground/air integration
//!
//! # Physics Model
//!
//! - Grounded: vertical velocity zeroed, accelerate toward the wish velocity,
//!   ground friction
//! - Airborne: half the gravity before the move and half after, wish velocity
//!   clamped to `max_force`, air friction
//!
//! # Usage
//!
//! ```rust,ignore
//! use flap_jumping_engine::player::MotionController;
//!
//! let mut motion = MotionController::new(config.motion.clone())
//!     .with_body(Box::new(body))
//!     .with_audio(Box::new(audio));
//!
//! // Each frame:
//! motion.on_frame(dt, &input, head.rotation(), &world);
//! // Each fixed tick:
//! motion.on_fixed_step(fixed_dt, &input, head.rotation(), &world);
//! ```

use glam::{Quat, Vec3};
use tracing::{debug, trace};

use super::body_turn::BodyTurn;
use super::crouch::{CrouchState, Stance};
use super::footsteps::{FootstepTimer, Gait};
use crate::animation::AnimationSink;
use crate::audio::AudioSink;
use crate::config::MotionConfig;
use crate::input::{InputAction, InputSource};
use crate::physics::{CharacterBody, PLAYER_TAG, PhysicsWorld, SurfaceKind};

/// Wish directions shorter than this stay unnormalized (effectively zero).
const WISH_EPSILON: f32 = 1e-6;

/// Position and body facing of the actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorPose {
    /// Feet position
    pub position: Vec3,
    /// Yaw-only facing of the visible body
    pub body_rotation: Quat,
}

impl Default for ActorPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            body_rotation: Quat::IDENTITY,
        }
    }
}

/// Snapshot of the motion state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub velocity: Vec3,
    pub is_crouching: bool,
    pub is_sprinting: bool,
    pub is_grounded: bool,
    /// Always horizontal
    pub wish_velocity: Vec3,
}

/// Wish velocity for the held movement actions, relative to `head`.
///
/// The result is horizontal and has magnitude zero or exactly the speed for
/// the current stance: crouch speed, else run speed when sprinting, else
/// walk speed.
pub fn wish_velocity(
    config: &MotionConfig,
    input: &dyn InputSource,
    head: Quat,
    crouching: bool,
    sprinting: bool,
) -> Vec3 {
    let forward = head * Vec3::NEG_Z;
    let right = head * Vec3::X;

    let mut wish = Vec3::ZERO;
    if input.is_down(InputAction::Forward) {
        wish += forward;
    }
    if input.is_down(InputAction::Backward) {
        wish -= forward;
    }
    if input.is_down(InputAction::Left) {
        wish -= right;
    }
    if input.is_down(InputAction::Right) {
        wish += right;
    }

    wish.y = 0.0;
    if wish.length() > WISH_EPSILON {
        wish = wish.normalize();
    }

    let speed = if crouching {
        config.crouch_speed
    } else if sprinting {
        config.run_speed
    } else {
        config.walk_speed
    };

    wish * speed
}

/// First-person locomotion: crouch, sprint, jump, movement integration,
/// body yaw, footsteps and animation parameters.
pub struct MotionController {
    config: MotionConfig,
    body: Option<Box<dyn CharacterBody>>,
    animation: Option<Box<dyn AnimationSink>>,
    audio: Option<Box<dyn AudioSink>>,
    pose: ActorPose,
    crouch: CrouchState,
    sprinting: bool,
    wish_velocity: Vec3,
    footsteps: FootstepTimer,
    /// Tags the footstep surface probe ignores
    probe_ignore_tags: Vec<String>,
}

impl MotionController {
    pub fn new(config: MotionConfig) -> Self {
        let footsteps = FootstepTimer::new(Gait::Walk.interval(&config));
        Self {
            config,
            body: None,
            animation: None,
            audio: None,
            pose: ActorPose::default(),
            crouch: CrouchState::new(),
            sprinting: false,
            wish_velocity: Vec3::ZERO,
            footsteps,
            probe_ignore_tags: vec![PLAYER_TAG.to_string()],
        }
    }

    pub fn with_body(mut self, body: Box<dyn CharacterBody>) -> Self {
        self.set_body(Some(body));
        self
    }

    pub fn with_animation(mut self, animation: Box<dyn AnimationSink>) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Swap the body. The pose follows the new body's position and the new
    /// body takes on the current stance.
    pub fn set_body(&mut self, mut body: Option<Box<dyn CharacterBody>>) {
        if let Some(body) = body.as_deref_mut() {
            self.pose.position = body.position();
            self.crouch.adopt(body);
        }
        self.body = body;
    }

    pub fn set_animation(&mut self, animation: Option<Box<dyn AnimationSink>>) {
        self.animation = animation;
    }

    pub fn set_audio(&mut self, audio: Option<Box<dyn AudioSink>>) {
        self.audio = audio;
    }

    pub fn body(&self) -> Option<&dyn CharacterBody> {
        self.body.as_deref()
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn pose(&self) -> &ActorPose {
        &self.pose
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn body_rotation(&self) -> Quat {
        self.pose.body_rotation
    }

    pub fn stance(&self) -> Stance {
        self.crouch.stance()
    }

    pub fn is_crouching(&self) -> bool {
        self.crouch.is_crouching()
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    pub fn is_grounded(&self) -> bool {
        self.body.as_deref().is_some_and(|body| body.is_on_ground())
    }

    pub fn velocity(&self) -> Vec3 {
        self.body.as_deref().map_or(Vec3::ZERO, |body| body.velocity())
    }

    /// Wish velocity from the most recent fixed step.
    pub fn wish_velocity(&self) -> Vec3 {
        self.wish_velocity
    }

    pub fn footsteps(&self) -> &FootstepTimer {
        &self.footsteps
    }

    pub fn state(&self) -> MotionState {
        MotionState {
            velocity: self.velocity(),
            is_crouching: self.is_crouching(),
            is_sprinting: self.sprinting,
            is_grounded: self.is_grounded(),
            wish_velocity: self.wish_velocity,
        }
    }

    /// Per-frame update. `head` is this frame's head rotation.
    pub fn on_frame(
        &mut self,
        dt: f32,
        input: &dyn InputSource,
        head: Quat,
        world: &dyn PhysicsWorld,
    ) {
        self.update_crouch(input);
        self.sprinting = input.is_down(InputAction::Run);
        if input.is_pressed(InputAction::Jump) {
            self.jump();
        }
        self.rotate_body(dt, head);
        self.publish_animation(head);
        self.update_footsteps(dt, world);
    }

    /// Fixed-rate movement integration.
    pub fn on_fixed_step(
        &mut self,
        dt: f32,
        input: &dyn InputSource,
        head: Quat,
        world: &dyn PhysicsWorld,
    ) {
        self.wish_velocity = wish_velocity(
            &self.config,
            input,
            head,
            self.crouch.is_crouching(),
            self.sprinting,
        );

        let Some(body) = self.body.as_deref_mut() else {
            return;
        };

        let gravity = world.gravity();
        let half_gravity = gravity * dt * 0.5;

        if body.is_on_ground() {
            body.set_velocity(horizontal(body.velocity()));
            body.accelerate(self.wish_velocity, self.config.acceleration, dt);
            body.apply_friction(self.config.ground_control, dt);
        } else {
            body.set_velocity(body.velocity() + half_gravity);
            body.accelerate(
                self.wish_velocity.clamp_length_max(self.config.max_force),
                self.config.acceleration,
                dt,
            );
            body.apply_friction(self.config.air_control, dt);
        }

        body.move_and_slide(dt);

        if body.is_on_ground() {
            body.set_velocity(horizontal(body.velocity()));
        } else {
            body.set_velocity(body.velocity() + half_gravity);
        }

        self.pose.position = body.position();

        trace!(
            grounded = body.is_on_ground(),
            wish_speed = self.wish_velocity.length(),
            speed = body.velocity().length(),
            "fixed step"
        );
    }

    fn update_crouch(&mut self, input: &dyn InputSource) {
        let Some(body) = self.body.as_deref_mut() else {
            return;
        };

        let pressed = input.is_pressed(InputAction::Crouch);
        let released = input.is_released(InputAction::Crouch);
        if let Some(stance) = self.crouch.update(pressed, released, body) {
            debug!(?stance, height = body.height(), "stance changed");
        }
    }

    fn jump(&mut self) {
        let Some(body) = self.body.as_deref_mut() else {
            return;
        };
        if !body.is_on_ground() {
            return;
        }

        body.punch(Vec3::Y * self.config.jump_force);
        if let Some(animation) = self.animation.as_deref_mut() {
            animation.trigger_jump();
        }
        debug!(impulse = self.config.jump_force, "jump");
    }

    fn rotate_body(&mut self, dt: f32, head: Quat) {
        let turn = BodyTurn {
            threshold_deg: self.config.body_turn_threshold_deg,
            speed_threshold: self.config.body_turn_speed_threshold,
            rate: self.config.body_turn_rate,
        };
        let speed = self.velocity().length();
        self.pose.body_rotation = turn.step(self.pose.body_rotation, head, speed, dt);
    }

    fn publish_animation(&mut self, head: Quat) {
        let velocity = self.velocity();
        let grounded = self.is_grounded();
        let duck_level = self.crouch.stance().duck_level();
        let Some(animation) = self.animation.as_deref_mut() else {
            return;
        };

        animation.set_wish_velocity(self.wish_velocity);
        animation.set_velocity(velocity);
        animation.set_aim_rotation(head);
        animation.set_grounded(grounded);
        animation.set_look(head * Vec3::NEG_Z, self.config.look_weights);
        animation.set_move_style(self.config.move_style);
        animation.set_duck_level(duck_level);
    }

    fn update_footsteps(&mut self, dt: f32, world: &dyn PhysicsWorld) {
        self.footsteps.advance(dt);

        let Some(body) = self.body.as_deref() else {
            return;
        };
        if !body.is_on_ground()
            || body.velocity().length() <= self.config.footstep_speed_threshold
            || !self.footsteps.is_due()
        {
            return;
        }

        let position = body.position();
        let probe_end = position + Vec3::NEG_Y * self.config.footstep_probe_length;
        let surface = world
            .ray_cast(position, probe_end, &self.probe_ignore_tags)
            .map_or(SurfaceKind::Default, |hit| hit.surface);

        if let Some(audio) = self.audio.as_deref_mut() {
            audio.play(surface.footstep_sound(), position);
        }

        let gait = Gait::from_flags(self.sprinting, self.crouch.is_crouching());
        self.footsteps.step(gait.interval(&self.config));
        debug!(?surface, ?gait, interval = self.footsteps.current_interval(), "footstep");
    }
}

fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::input::ActionInput;
    use crate::physics::{BodyConfig, KinematicBody, StaticWorld};

    const DT: f32 = 1.0 / 60.0;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    fn create_input(forward: bool, backward: bool, left: bool, right: bool) -> ActionInput {
        let mut input = ActionInput::new();
        input.set_action(InputAction::Forward, forward);
        input.set_action(InputAction::Backward, backward);
        input.set_action(InputAction::Left, left);
        input.set_action(InputAction::Right, right);
        input
    }

    fn grounded_controller() -> (MotionController, Arc<StaticWorld>) {
        let world = Arc::new(StaticWorld::new());
        let body = KinematicBody::new(Arc::clone(&world), BodyConfig::default())
            .with_position(Vec3::ZERO);
        let controller = MotionController::new(MotionConfig::default()).with_body(Box::new(body));
        (controller, world)
    }

    #[test]
    fn test_no_input_no_wish() {
        let config = MotionConfig::default();
        let input = create_input(false, false, false, false);
        let wish = wish_velocity(&config, &input, Quat::IDENTITY, false, false);
        assert_eq!(wish, Vec3::ZERO);
    }

    #[test]
    fn test_forward_is_negative_z_at_zero_yaw() {
        let config = MotionConfig::default();
        let input = create_input(true, false, false, false);
        let wish = wish_velocity(&config, &input, Quat::IDENTITY, false, false);
        assert!(approx_eq(wish.z, -160.0));
        assert!(approx_eq(wish.x, 0.0));
    }

    #[test]
    fn test_strafe_right_is_positive_x() {
        let config = MotionConfig::default();
        let input = create_input(false, false, false, true);
        let wish = wish_velocity(&config, &input, Quat::IDENTITY, false, false);
        assert!(approx_eq(wish.x, 160.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let config = MotionConfig::default();
        let input = create_input(true, true, true, true);
        let wish = wish_velocity(&config, &input, Quat::IDENTITY, false, true);
        assert_eq!(wish, Vec3::ZERO);
    }

    #[test]
    fn test_pitch_does_not_leak_into_wish() {
        let config = MotionConfig::default();
        let input = create_input(true, false, false, false);
        let head = Quat::from_rotation_y(0.3) * Quat::from_rotation_x(-1.2);

        let wish = wish_velocity(&config, &input, head, false, false);
        assert_eq!(wish.y, 0.0);
        assert!(approx_eq(wish.length(), 160.0));
    }

    #[test]
    fn test_stance_speed_priority() {
        let config = MotionConfig::default();
        let input = create_input(true, false, false, false);

        let crouch_and_run = wish_velocity(&config, &input, Quat::IDENTITY, true, true);
        assert!(approx_eq(crouch_and_run.length(), 90.0));

        let run = wish_velocity(&config, &input, Quat::IDENTITY, false, true);
        assert!(approx_eq(run.length(), 290.0));
    }

    #[test]
    fn test_fixed_step_moves_forward() {
        let (mut controller, world) = grounded_controller();
        let input = create_input(true, false, false, false);

        for _ in 0..60 {
            controller.on_fixed_step(DT, &input, Quat::IDENTITY, world.as_ref());
        }

        assert!(controller.position().z < -50.0);
        assert!(controller.is_grounded());
        assert_eq!(controller.velocity().y, 0.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let (mut controller, world) = grounded_controller();
        let mut input = ActionInput::new();
        input.press(InputAction::Jump);

        controller.on_frame(DT, &input, Quat::IDENTITY, world.as_ref());
        assert!(approx_eq(controller.velocity().y, 400.0));
        assert!(!controller.is_grounded());

        // Second press mid-air does nothing
        input.end_frame();
        input.release(InputAction::Jump);
        input.end_frame();
        input.press(InputAction::Jump);
        controller.on_frame(DT, &input, Quat::IDENTITY, world.as_ref());
        assert!(approx_eq(controller.velocity().y, 400.0));
    }

    #[test]
    fn test_jump_lands_again() {
        let (mut controller, world) = grounded_controller();
        let mut input = ActionInput::new();
        input.press(InputAction::Jump);
        controller.on_frame(DT, &input, Quat::IDENTITY, world.as_ref());
        input.end_frame();

        for _ in 0..120 {
            controller.on_fixed_step(DT, &input, Quat::IDENTITY, world.as_ref());
        }

        assert!(controller.is_grounded());
        assert!(approx_eq(controller.position().y, 0.0));
    }

    #[test]
    fn test_missing_body_is_noop() {
        let world = StaticWorld::new();
        let mut controller = MotionController::new(MotionConfig::default());
        let mut input = create_input(true, false, false, false);
        input.press(InputAction::Jump);
        input.press(InputAction::Crouch);

        controller.on_frame(DT, &input, Quat::IDENTITY, &world);
        controller.on_fixed_step(DT, &input, Quat::IDENTITY, &world);

        assert!(!controller.is_crouching());
        assert_eq!(controller.velocity(), Vec3::ZERO);
        assert_eq!(controller.position(), Vec3::ZERO);
        // Wish velocity is still derived from input
        assert!(approx_eq(controller.wish_velocity().length(), 160.0));
    }

    #[test]
    fn test_sprint_follows_run_level() {
        let (mut controller, world) = grounded_controller();
        let mut input = ActionInput::new();

        input.press(InputAction::Run);
        controller.on_frame(DT, &input, Quat::IDENTITY, world.as_ref());
        assert!(controller.is_sprinting());

        input.release(InputAction::Run);
        controller.on_frame(DT, &input, Quat::IDENTITY, world.as_ref());
        assert!(!controller.is_sprinting());
    }
}
