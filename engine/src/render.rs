//! Render Sink
//!
//! The only render-side state the controller touches is how the player's own
//! body mesh is drawn. In first person the mesh must stay out of the camera
//! while still casting shadows.

use serde::{Deserialize, Serialize};

/// How a mesh participates in rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowRenderMode {
    /// Visible to cameras and casts shadows.
    #[default]
    On,
    /// Invisible to cameras, still casts shadows.
    ShadowsOnly,
}

/// Handle to the player's body mesh renderer.
pub trait BodyRenderer {
    fn set_shadow_mode(&mut self, mode: ShadowRenderMode);
}
