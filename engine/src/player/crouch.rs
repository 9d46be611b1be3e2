//! Player Crouch System
//!
//! Edge-triggered crouching: the crouch press halves the collision height,
//! the crouch release doubles it back. Holding the key never re-enters the
//! transition, so the height is always exactly standing or exactly half.
//!
//! # Usage
//!
//! ```rust,ignore
//! use flap_jumping_engine::player::CrouchState;
//!
//! let mut crouch = CrouchState::new();
//!
//! // Each frame:
//! if let Some(stance) = crouch.update(crouch_pressed, crouch_released, &mut body) {
//!     // stance changed this frame
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::physics::CharacterBody;

/// Player stance states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stance {
    /// Full collision height
    #[default]
    Standing,
    /// Half collision height
    Crouching,
}

impl Stance {
    pub fn is_crouching(self) -> bool {
        self == Stance::Crouching
    }

    /// Animation duck level: 1.0 crouched, 0.0 standing.
    pub fn duck_level(self) -> f32 {
        match self {
            Stance::Standing => 0.0,
            Stance::Crouching => 1.0,
        }
    }
}

/// Edge-triggered crouch state.
#[derive(Debug, Clone, Default)]
pub struct CrouchState {
    stance: Stance,
}

impl CrouchState {
    /// Create a crouch state in standing stance.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn is_crouching(&self) -> bool {
        self.stance.is_crouching()
    }

    /// Apply this frame's crouch edges to `body`.
    ///
    /// `pressed` / `released` are the crouch action's edges for this frame.
    /// Returns the new stance if it differs from the stance before the call.
    pub fn update(
        &mut self,
        pressed: bool,
        released: bool,
        body: &mut dyn CharacterBody,
    ) -> Option<Stance> {
        let before = self.stance;

        if pressed && self.stance == Stance::Standing {
            self.stance = Stance::Crouching;
            body.set_height(body.height() / 2.0);
        }

        if released && self.stance == Stance::Crouching {
            self.stance = Stance::Standing;
            body.set_height(body.height() * 2.0);
        }

        (self.stance != before).then_some(self.stance)
    }

    /// Bring a newly attached body, which arrives at standing height, into
    /// the current stance.
    pub fn adopt(&self, body: &mut dyn CharacterBody) {
        if self.is_crouching() {
            body.set_height(body.height() / 2.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::physics::{BodyConfig, KinematicBody, StaticWorld};

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn body() -> KinematicBody {
        KinematicBody::new(Arc::new(StaticWorld::new()), BodyConfig::default())
    }

    #[test]
    fn test_default_is_standing() {
        let crouch = CrouchState::new();
        assert_eq!(crouch.stance(), Stance::Standing);
        assert!(!crouch.is_crouching());
        assert_eq!(crouch.stance().duck_level(), 0.0);
    }

    #[test]
    fn test_press_halves_height() {
        let mut crouch = CrouchState::new();
        let mut body = body();

        let change = crouch.update(true, false, &mut body);

        assert_eq!(change, Some(Stance::Crouching));
        assert!(approx_eq(body.height(), 36.0));
        assert_eq!(crouch.stance().duck_level(), 1.0);
    }

    #[test]
    fn test_release_restores_height() {
        let mut crouch = CrouchState::new();
        let mut body = body();

        crouch.update(true, false, &mut body);
        let change = crouch.update(false, true, &mut body);

        assert_eq!(change, Some(Stance::Standing));
        assert!(approx_eq(body.height(), 72.0));
    }

    #[test]
    fn test_repeated_press_is_idempotent() {
        let mut crouch = CrouchState::new();
        let mut body = body();

        crouch.update(true, false, &mut body);
        for _ in 0..10 {
            assert_eq!(crouch.update(true, false, &mut body), None);
        }

        assert!(crouch.is_crouching());
        assert!(approx_eq(body.height(), 36.0));
    }

    #[test]
    fn test_release_while_standing_is_ignored() {
        let mut crouch = CrouchState::new();
        let mut body = body();

        assert_eq!(crouch.update(false, true, &mut body), None);
        assert!(approx_eq(body.height(), 72.0));
    }

    #[test]
    fn test_tap_within_one_frame_nets_out() {
        let mut crouch = CrouchState::new();
        let mut body = body();

        assert_eq!(crouch.update(true, true, &mut body), None);
        assert!(!crouch.is_crouching());
        assert!(approx_eq(body.height(), 72.0));
    }

    #[test]
    fn test_adopt_matches_current_stance() {
        let mut crouch = CrouchState::new();
        let mut standing = body();
        crouch.adopt(&mut standing);
        assert!(approx_eq(standing.height(), 72.0));

        let mut first = body();
        crouch.update(true, false, &mut first);

        let mut second = body();
        crouch.adopt(&mut second);
        assert!(approx_eq(second.height(), 36.0));

        crouch.update(false, true, &mut second);
        assert!(approx_eq(second.height(), 72.0));
    }
}
