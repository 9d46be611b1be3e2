//! Flap Jumping Engine Library
//!
//! A first-person character controller: player input becomes movement of a
//! physics body, a head/camera rig follows with crouch smoothing and
//! third-person occlusion, and locomotion parameters are pushed to an
//! animation graph.
//!
//! Rendering, audio playback, skeletal animation and the physics solver are
//! external collaborators reached through small traits. Every collaborator is
//! optional; a missing one turns the steps that need it into no-ops.
//!
//! # Modules
//!
//! - [`actor`] - [`Actor`], one character with its fixed per-frame update order
//! - [`player`] - Motion controller: crouch, sprint, jump, integration, footsteps
//! - [`camera`] - Head mouse-look and first/third person camera placement
//! - [`input`] - Action input trait and the winit-backed key binding implementation
//! - [`physics`] - Body/world traits, ray casts, surfaces and reference collaborators
//! - [`config`] - Tunables with JSON load/save and validation
//! - [`animation`], [`audio`], [`render`] - Output sinks
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use flap_jumping_engine::{Actor, ActionInput, ControllerConfig};
//! use flap_jumping_engine::physics::{BodyConfig, KinematicBody, StaticWorld};
//!
//! let config = ControllerConfig::load("controller.json")?;
//! let world = Arc::new(StaticWorld::new());
//! let body = KinematicBody::new(Arc::clone(&world), BodyConfig::default());
//!
//! let mut actor = Actor::new(&config).with_body(Box::new(body));
//! let mut input = ActionInput::new();
//!
//! // Host loop
//! actor.on_frame(dt, &input, world.as_ref());
//! for _ in 0..fixed_steps {
//!     actor.on_fixed_step(fixed_dt, &input, world.as_ref());
//! }
//! input.end_frame();
//! ```

pub mod actor;
pub mod animation;
pub mod audio;
pub mod camera;
pub mod config;
pub mod input;
pub mod physics;
pub mod player;
pub mod render;

pub use actor::Actor;
pub use animation::{AnimationSink, LookWeights, MoveStyle};
pub use audio::{AudioSink, SoundId};
pub use camera::{CameraMode, CameraRig, CameraTransform, HeadOrientation};
pub use config::{CameraConfig, ConfigError, ControllerConfig, MotionConfig};
pub use input::{ActionInput, InputAction, InputSource};
pub use physics::{CharacterBody, PhysicsWorld, RayHit, SurfaceKind};
pub use player::{MotionController, MotionState};
pub use render::{BodyRenderer, ShadowRenderMode};
