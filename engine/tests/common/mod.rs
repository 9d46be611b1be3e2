//! Shared test doubles
//!
//! Recording mocks for every collaborator trait. Each mock hands out an
//! `Rc<RefCell<..>>` log so a test can keep inspecting it after the mock has
//! been boxed into a controller.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};

use flap_jumping_engine::animation::{AnimationSink, LookWeights, MoveStyle};
use flap_jumping_engine::audio::{AudioSink, SoundId};
use flap_jumping_engine::input::{InputAction, InputSource};
use flap_jumping_engine::physics::{CharacterBody, PhysicsWorld, RayHit};
use flap_jumping_engine::render::{BodyRenderer, ShadowRenderMode};

pub type Shared<T> = Rc<RefCell<T>>;

pub const DT: f32 = 1.0 / 60.0;

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.001
}

pub fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 0.001
}

// ============================================================================
// Input
// ============================================================================

/// Input whose held/edge sets are written directly by the test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pub down: HashSet<InputAction>,
    pub pressed: HashSet<InputAction>,
    pub released: HashSet<InputAction>,
    pub mouse: Vec2,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding(actions: &[InputAction]) -> Self {
        let mut input = Self::new();
        input.down.extend(actions.iter().copied());
        input
    }

    pub fn press(&mut self, action: InputAction) {
        self.down.insert(action);
        self.pressed.insert(action);
    }

    pub fn release(&mut self, action: InputAction) {
        self.down.remove(&action);
        self.released.insert(action);
    }

    /// Clear edges and mouse motion, keep held actions.
    pub fn next_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.mouse = Vec2::ZERO;
    }
}

impl InputSource for ScriptedInput {
    fn is_down(&self, action: InputAction) -> bool {
        self.down.contains(&action)
    }

    fn is_pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(&action)
    }

    fn is_released(&self, action: InputAction) -> bool {
        self.released.contains(&action)
    }

    fn mouse_delta(&self) -> Vec2 {
        self.mouse
    }
}

// ============================================================================
// Physics
// ============================================================================

#[derive(Debug, Clone)]
pub struct BodyLog {
    pub position: Vec3,
    pub velocity: Vec3,
    pub height: f32,
    pub grounded: bool,
    /// While set, `move_and_slide` never changes the grounded flag
    pub pin_grounded: bool,
    /// While set, `move_and_slide` ends on the ground
    pub land_on_move: bool,
    pub punches: Vec<Vec3>,
    /// Wish velocities passed to `accelerate`
    pub accelerations: Vec<Vec3>,
    /// Friction values passed to `apply_friction`
    pub frictions: Vec<f32>,
    pub moves: usize,
}

impl Default for BodyLog {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            height: 72.0,
            grounded: true,
            pin_grounded: true,
            land_on_move: false,
            punches: Vec::new(),
            accelerations: Vec::new(),
            frictions: Vec::new(),
            moves: 0,
        }
    }
}

/// Body that integrates position and records every primitive call.
///
/// `accelerate` and `apply_friction` only record; velocity changes come from
/// the controller itself, `set_velocity` and `punch`.
#[derive(Debug, Clone)]
pub struct MockBody {
    pub log: Shared<BodyLog>,
}

impl MockBody {
    pub fn grounded() -> (Self, Shared<BodyLog>) {
        Self::with_log(BodyLog::default())
    }

    pub fn airborne() -> (Self, Shared<BodyLog>) {
        Self::with_log(BodyLog {
            grounded: false,
            ..Default::default()
        })
    }

    pub fn with_log(log: BodyLog) -> (Self, Shared<BodyLog>) {
        let log = Rc::new(RefCell::new(log));
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl CharacterBody for MockBody {
    fn is_on_ground(&self) -> bool {
        self.log.borrow().grounded
    }

    fn position(&self) -> Vec3 {
        self.log.borrow().position
    }

    fn velocity(&self) -> Vec3 {
        self.log.borrow().velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.log.borrow_mut().velocity = velocity;
    }

    fn height(&self) -> f32 {
        self.log.borrow().height
    }

    fn set_height(&mut self, height: f32) {
        self.log.borrow_mut().height = height;
    }

    fn accelerate(&mut self, wish_velocity: Vec3, _acceleration: f32, _dt: f32) {
        self.log.borrow_mut().accelerations.push(wish_velocity);
    }

    fn apply_friction(&mut self, friction: f32, _dt: f32) {
        self.log.borrow_mut().frictions.push(friction);
    }

    fn move_and_slide(&mut self, dt: f32) {
        let mut log = self.log.borrow_mut();
        let velocity = log.velocity;
        log.position += velocity * dt;
        log.moves += 1;
        if log.land_on_move {
            log.grounded = true;
        }
    }

    fn punch(&mut self, impulse: Vec3) {
        let mut log = self.log.borrow_mut();
        log.velocity += impulse;
        log.punches.push(impulse);
        if !log.pin_grounded {
            log.grounded = false;
        }
    }
}

#[derive(Debug, Clone)]
pub struct RayCastCall {
    pub from: Vec3,
    pub to: Vec3,
    pub ignore_tags: Vec<String>,
}

/// World with a programmable ray cast result.
#[derive(Debug, Default)]
pub struct MockWorld {
    pub gravity: Vec3,
    /// Returned by every ray cast
    pub hit: Option<RayHit>,
    pub casts: RefCell<Vec<RayCastCall>>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self {
            gravity: Vec3::new(0.0, -800.0, 0.0),
            hit: None,
            casts: RefCell::new(Vec::new()),
        }
    }

    pub fn with_hit(hit: RayHit) -> Self {
        Self {
            hit: Some(hit),
            ..Self::new()
        }
    }
}

impl PhysicsWorld for MockWorld {
    fn gravity(&self) -> Vec3 {
        self.gravity
    }

    fn ray_cast(&self, from: Vec3, to: Vec3, ignore_tags: &[String]) -> Option<RayHit> {
        self.casts.borrow_mut().push(RayCastCall {
            from,
            to,
            ignore_tags: ignore_tags.to_vec(),
        });
        self.hit
    }
}

// ============================================================================
// Sinks
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct AnimationLog {
    pub wish_velocity: Option<Vec3>,
    pub velocity: Option<Vec3>,
    pub aim: Option<Quat>,
    pub grounded: Option<bool>,
    pub look: Option<(Vec3, LookWeights)>,
    pub move_style: Option<MoveStyle>,
    pub duck_level: Option<f32>,
    pub jumps: usize,
    pub updates: usize,
}

#[derive(Debug, Clone)]
pub struct RecordingAnimation {
    pub log: Shared<AnimationLog>,
}

impl RecordingAnimation {
    pub fn new() -> (Self, Shared<AnimationLog>) {
        let log = Rc::new(RefCell::new(AnimationLog::default()));
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl AnimationSink for RecordingAnimation {
    fn set_wish_velocity(&mut self, wish_velocity: Vec3) {
        let mut log = self.log.borrow_mut();
        log.wish_velocity = Some(wish_velocity);
        log.updates += 1;
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.log.borrow_mut().velocity = Some(velocity);
    }

    fn set_aim_rotation(&mut self, aim: Quat) {
        self.log.borrow_mut().aim = Some(aim);
    }

    fn set_grounded(&mut self, grounded: bool) {
        self.log.borrow_mut().grounded = Some(grounded);
    }

    fn set_look(&mut self, direction: Vec3, weights: LookWeights) {
        self.log.borrow_mut().look = Some((direction, weights));
    }

    fn set_move_style(&mut self, style: MoveStyle) {
        self.log.borrow_mut().move_style = Some(style);
    }

    fn set_duck_level(&mut self, level: f32) {
        self.log.borrow_mut().duck_level = Some(level);
    }

    fn trigger_jump(&mut self) {
        self.log.borrow_mut().jumps += 1;
    }
}

#[derive(Debug, Clone)]
pub struct RecordingAudio {
    pub log: Shared<Vec<(SoundId, Vec3)>>,
}

impl RecordingAudio {
    pub fn new() -> (Self, Shared<Vec<(SoundId, Vec3)>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: SoundId, position: Vec3) {
        self.log.borrow_mut().push((sound, position));
    }
}

#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    pub log: Shared<Vec<ShadowRenderMode>>,
}

impl RecordingRenderer {
    pub fn new() -> (Self, Shared<Vec<ShadowRenderMode>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl BodyRenderer for RecordingRenderer {
    fn set_shadow_mode(&mut self, mode: ShadowRenderMode) {
        self.log.borrow_mut().push(mode);
    }
}
