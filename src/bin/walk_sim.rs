//! Walk Sim - Headless Controller Driver
//!
//! Run with: `cargo run --bin walk_sim [config.json]`
//!
//! Plays a scripted key/mouse timeline through an `Actor` standing in a small
//! static world (grass field, wooden deck, concrete wall) and logs footsteps,
//! jumps, stance changes and camera mode switches. Set `RUST_LOG=debug` for
//! per-event controller logs or `RUST_LOG=trace` for every fixed step.

use std::sync::Arc;

use glam::{Quat, Vec3};
use tracing::{info, trace};
use winit::keyboard::KeyCode;

use flap_jumping_engine::animation::{AnimationSink, LookWeights, MoveStyle};
use flap_jumping_engine::audio::{AudioSink, SoundId};
use flap_jumping_engine::physics::{Aabb, KinematicBody, StaticWorld, SurfaceKind, WorldBox};
use flap_jumping_engine::render::{BodyRenderer, ShadowRenderMode};
use flap_jumping_engine::{ActionInput, Actor, ConfigError, ControllerConfig};

const FIXED_PHYSICS_STEP_S: f32 = 1.0 / 60.0;
const MAX_FIXED_STEPS_PER_FRAME: usize = 6;
const SIM_DURATION_S: f32 = 9.0;

/// One scripted input change.
enum Event {
    Key(KeyCode, bool),
    Mouse(f32, f32),
    CameraDistance(f32),
}

/// Input timeline, sorted by time in seconds.
fn script() -> Vec<(f32, Event)> {
    vec![
        (0.5, Event::Key(KeyCode::KeyW, true)),
        (1.5, Event::Key(KeyCode::ShiftLeft, true)),
        (2.5, Event::Key(KeyCode::Space, true)),
        (2.6, Event::Key(KeyCode::Space, false)),
        (3.5, Event::Key(KeyCode::ShiftLeft, false)),
        (3.5, Event::Mouse(900.0, 0.0)),
        (4.0, Event::Key(KeyCode::ControlLeft, true)),
        (5.0, Event::Key(KeyCode::ControlLeft, false)),
        (5.5, Event::CameraDistance(150.0)),
        (6.0, Event::Mouse(-450.0, 120.0)),
        (7.5, Event::CameraDistance(0.0)),
        (8.0, Event::Key(KeyCode::KeyW, false)),
    ]
}

fn build_world() -> StaticWorld {
    StaticWorld::new()
        .with_ground(0.0, SurfaceKind::Grass)
        // Wooden deck flush with the ground, a step ahead of the spawn
        .with_box(WorldBox::new(
            Aabb::new(Vec3::new(-200.0, -20.0, -700.0), Vec3::new(200.0, 0.0, -300.0)),
            SurfaceKind::Wood,
        ))
        // Concrete wall at the end of the deck
        .with_box(WorldBox::new(
            Aabb::new(Vec3::new(-400.0, 0.0, -960.0), Vec3::new(400.0, 300.0, -900.0)),
            SurfaceKind::Concrete,
        ))
}

struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, sound: SoundId, position: Vec3) {
        info!(sound = sound.as_str(), x = position.x, y = position.y, z = position.z, "play sound");
    }
}

#[derive(Default)]
struct LogAnimation {
    duck_level: f32,
}

impl AnimationSink for LogAnimation {
    fn set_wish_velocity(&mut self, wish_velocity: Vec3) {
        trace!(?wish_velocity, "anim wish velocity");
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        trace!(?velocity, "anim velocity");
    }

    fn set_aim_rotation(&mut self, _aim: Quat) {}

    fn set_grounded(&mut self, _grounded: bool) {}

    fn set_look(&mut self, _direction: Vec3, _weights: LookWeights) {}

    fn set_move_style(&mut self, _style: MoveStyle) {}

    fn set_duck_level(&mut self, level: f32) {
        if level != self.duck_level {
            info!(level, "anim duck level");
            self.duck_level = level;
        }
    }

    fn trigger_jump(&mut self) {
        info!("anim jump");
    }
}

#[derive(Default)]
struct LogRenderer {
    mode: Option<ShadowRenderMode>,
}

impl BodyRenderer for LogRenderer {
    fn set_shadow_mode(&mut self, mode: ShadowRenderMode) {
        if self.mode != Some(mode) {
            info!(?mode, "body shadow mode");
            self.mode = Some(mode);
        }
    }
}

fn main() -> Result<(), ConfigError> {
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading controller config");
            ControllerConfig::load(&path)?
        }
        None => ControllerConfig::default(),
    };

    let world = Arc::new(build_world());
    let body = KinematicBody::new(Arc::clone(&world), config.body).with_position(Vec3::ZERO);
    let mut actor = Actor::new(&config)
        .with_body(Box::new(body))
        .with_animation(Box::new(LogAnimation::default()))
        .with_audio(Box::new(LogAudio))
        .with_body_renderer(Box::new(LogRenderer::default()));
    let mut input = ActionInput::new();

    let mut events = script().into_iter().peekable();
    let mut time = 0.0f32;
    let mut accumulator = 0.0f32;
    let mut frame = 0u64;

    while time < SIM_DURATION_S {
        // Uneven frame times exercise the fixed-step accumulator
        let delta = if frame % 3 == 0 { 1.0 / 30.0 } else { 1.0 / 90.0 };
        time += delta;
        frame += 1;

        while let Some((_, event)) = events.next_if(|(at, _)| *at <= time) {
            match event {
                Event::Key(key, pressed) => input.handle_key(key, pressed),
                Event::Mouse(dx, dy) => input.handle_mouse_delta(dx, dy),
                Event::CameraDistance(distance) => {
                    info!(distance, "camera distance");
                    actor.set_third_person_distance(distance);
                }
            }
        }

        actor.on_frame(delta, &input, world.as_ref());

        accumulator = (accumulator + delta.clamp(0.0, 0.1))
            .min(FIXED_PHYSICS_STEP_S * MAX_FIXED_STEPS_PER_FRAME as f32);
        let mut steps = 0usize;
        while accumulator >= FIXED_PHYSICS_STEP_S && steps < MAX_FIXED_STEPS_PER_FRAME {
            actor.on_fixed_step(FIXED_PHYSICS_STEP_S, &input, world.as_ref());
            accumulator -= FIXED_PHYSICS_STEP_S;
            steps += 1;
        }

        input.end_frame();

        if frame % 60 == 0 {
            let state = actor.motion_state();
            let position = actor.position();
            info!(
                t = time,
                x = position.x,
                y = position.y,
                z = position.z,
                speed = state.velocity.length(),
                grounded = state.is_grounded,
                crouching = state.is_crouching,
                sprinting = state.is_sprinting,
                camera = ?actor.camera_mode(),
                "status"
            );
        }
    }

    info!(frames = frame, position = ?actor.position(), "simulation finished");
    Ok(())
}
