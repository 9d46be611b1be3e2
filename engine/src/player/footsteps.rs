//! Footstep cadence
//!
//! A step plays when the player is grounded, moving faster than a threshold
//! and the time since the previous step exceeds the current interval. The
//! interval is only re-read from the gait when a step fires, so a gait change
//! mid-stride takes effect on the following step.

use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;

/// Walking style that decides the step interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gait {
    #[default]
    Walk,
    Run,
    Crouch,
}

impl Gait {
    /// Sprinting wins over crouching.
    pub fn from_flags(sprinting: bool, crouching: bool) -> Self {
        if sprinting {
            Gait::Run
        } else if crouching {
            Gait::Crouch
        } else {
            Gait::Walk
        }
    }

    pub fn interval(self, config: &MotionConfig) -> f32 {
        match self {
            Gait::Walk => config.footstep_interval_walk,
            Gait::Run => config.footstep_interval_run,
            Gait::Crouch => config.footstep_interval_crouch,
        }
    }
}

/// Time since the last step and the interval until the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct FootstepTimer {
    time_since_last_step: f32,
    current_interval: f32,
}

impl FootstepTimer {
    pub fn new(initial_interval: f32) -> Self {
        Self {
            time_since_last_step: 0.0,
            current_interval: initial_interval,
        }
    }

    pub fn time_since_last_step(&self) -> f32 {
        self.time_since_last_step
    }

    pub fn current_interval(&self) -> f32 {
        self.current_interval
    }

    /// Advance the clock. Time passes whether or not the player is moving.
    pub fn advance(&mut self, dt: f32) {
        self.time_since_last_step += dt;
    }

    pub fn is_due(&self) -> bool {
        self.time_since_last_step > self.current_interval
    }

    /// Record a step: reset the clock and take the next interval.
    pub fn step(&mut self, next_interval: f32) {
        self.time_since_last_step = 0.0;
        self.current_interval = next_interval;
    }
}
