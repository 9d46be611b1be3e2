//! Controller configuration
//!
//! Every tunable of the motion controller and camera rig, with defaults that
//! reproduce the stock feel (inch-scale units). Configs persist as JSON.
//!
//! Tick code never validates; call [`ControllerConfig::validate`] (or load
//! through [`ControllerConfig::load`], which does) at the boundary.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::animation::{LookWeights, MoveStyle};
use crate::physics::{BodyConfig, PLAYER_TAG};

/// Errors raised while loading, saving or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Movement tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed: f32,
    /// Friction while grounded
    pub ground_control: f32,
    /// Friction while airborne
    pub air_control: f32,
    /// Cap on the airborne wish velocity
    pub max_force: f32,
    pub acceleration: f32,
    /// Upward impulse applied on jump
    pub jump_force: f32,
    /// Body turns once the head is this many degrees away from it
    pub body_turn_threshold_deg: f32,
    /// Body turns whenever moving faster than this
    pub body_turn_speed_threshold: f32,
    /// Body slerp factor per second
    pub body_turn_rate: f32,
    pub footstep_speed_threshold: f32,
    /// Length of the downward surface probe
    pub footstep_probe_length: f32,
    pub footstep_interval_walk: f32,
    pub footstep_interval_run: f32,
    pub footstep_interval_crouch: f32,
    pub look_weights: LookWeights,
    /// Locomotion style requested from the animation graph
    pub move_style: MoveStyle,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 160.0,
            run_speed: 290.0,
            crouch_speed: 90.0,
            ground_control: 4.0,
            air_control: 0.1,
            max_force: 50.0,
            acceleration: 10.0,
            jump_force: 400.0,
            body_turn_threshold_deg: 50.0,
            body_turn_speed_threshold: 10.0,
            body_turn_rate: 2.0,
            footstep_speed_threshold: 100.0,
            footstep_probe_length: 10.0,
            footstep_interval_walk: 0.5,
            footstep_interval_run: 0.35,
            footstep_interval_crouch: 0.6,
            look_weights: LookWeights::default(),
            move_style: MoveStyle::Run,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("motion.walk_speed", self.walk_speed),
            ("motion.run_speed", self.run_speed),
            ("motion.crouch_speed", self.crouch_speed),
            ("motion.ground_control", self.ground_control),
            ("motion.air_control", self.air_control),
            ("motion.max_force", self.max_force),
            ("motion.acceleration", self.acceleration),
            ("motion.jump_force", self.jump_force),
            ("motion.body_turn_threshold_deg", self.body_turn_threshold_deg),
            ("motion.body_turn_speed_threshold", self.body_turn_speed_threshold),
            ("motion.body_turn_rate", self.body_turn_rate),
            ("motion.footstep_speed_threshold", self.footstep_speed_threshold),
            ("motion.footstep_probe_length", self.footstep_probe_length),
        ];
        for (field, value) in non_negative {
            check_non_negative(field, value)?;
        }

        let intervals = [
            ("motion.footstep_interval_walk", self.footstep_interval_walk),
            ("motion.footstep_interval_run", self.footstep_interval_run),
            ("motion.footstep_interval_crouch", self.footstep_interval_crouch),
        ];
        for (field, value) in intervals {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        let LookWeights { eyes, head, body } = self.look_weights;
        for (field, value) in [
            ("motion.look_weights.eyes", eyes),
            ("motion.look_weights.head", head),
            ("motion.look_weights.body", body),
        ] {
            check_non_negative(field, value)?;
        }

        Ok(())
    }
}

/// Camera tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Degrees of rotation per mouse unit
    pub sensitivity: f32,
    /// Pitch is clamped to +/- this many degrees
    pub pitch_limit_deg: f32,
    /// How far the camera drops while crouched
    pub crouch_offset: f32,
    /// Crouch offset lerp rate per second
    pub offset_smoothing: f32,
    /// Zero means first person
    pub third_person_distance: f32,
    /// Head height above the actor's feet
    pub eye_height: f32,
    /// Gap kept between an obstructed camera and the hit point
    pub collision_skin: f32,
    /// Tags the occlusion ray ignores
    pub ignore_tags: Vec<String>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            pitch_limit_deg: 89.9,
            crouch_offset: 32.0,
            offset_smoothing: 10.0,
            third_person_distance: 0.0,
            eye_height: 64.0,
            collision_skin: 0.0,
            ignore_tags: vec![PLAYER_TAG.to_string()],
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pitch_limit_deg.is_finite()
            || self.pitch_limit_deg <= 0.0
            || self.pitch_limit_deg >= 90.0
        {
            return Err(ConfigError::invalid(
                "camera.pitch_limit_deg",
                format!("must be within (0, 90), got {}", self.pitch_limit_deg),
            ));
        }

        if !self.sensitivity.is_finite() {
            return Err(ConfigError::invalid("camera.sensitivity", "must be finite"));
        }
        if !self.eye_height.is_finite() {
            return Err(ConfigError::invalid("camera.eye_height", "must be finite"));
        }

        for (field, value) in [
            ("camera.crouch_offset", self.crouch_offset),
            ("camera.offset_smoothing", self.offset_smoothing),
            ("camera.third_person_distance", self.third_person_distance),
            ("camera.collision_skin", self.collision_skin),
        ] {
            check_non_negative(field, value)?;
        }

        Ok(())
    }
}

/// Full controller configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub motion: MotionConfig,
    pub camera: CameraConfig,
    /// Shape of the reference kinematic body
    pub body: BodyConfig,
}

impl ControllerConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        config.warn_suspicious();
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.motion.validate()?;
        self.camera.validate()?;
        self.body.validate()
    }

    /// Values that pass validation but almost certainly are mistakes.
    fn warn_suspicious(&self) {
        if self.camera.sensitivity == 0.0 {
            warn!("camera.sensitivity is 0, mouse look is disabled");
        }
        if self.motion.walk_speed == 0.0 {
            warn!("motion.walk_speed is 0, the player cannot walk");
        }
        if self.motion.run_speed < self.motion.walk_speed {
            warn!(
                run_speed = self.motion.run_speed,
                walk_speed = self.motion.walk_speed,
                "motion.run_speed is slower than walking"
            );
        }
        if !self.camera.ignore_tags.iter().any(|tag| tag == PLAYER_TAG) {
            warn!("camera.ignore_tags does not contain \"{PLAYER_TAG}\", the camera may collide with its own body");
        }
    }
}

pub(crate) fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::invalid(field, "must be finite"));
    }
    if value < 0.0 {
        return Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")));
    }
    Ok(())
}
