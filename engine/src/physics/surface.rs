//! Surface Kinds
//!
//! Maps the material under the player's feet to a footstep sound.
//! Material names coming from the collision world are resolved once into a
//! [`SurfaceKind`]; the sound table is an exhaustive `match` with a default arm.

use serde::{Deserialize, Serialize};

use crate::audio::SoundId;

/// Footstep sound played on grass (also the fallback sound).
pub const FOOTSTEP_GRASS: SoundId = SoundId("sounds/footsteps/footstep-grass.sound");
/// Footstep sound played on wood.
pub const FOOTSTEP_WOOD: SoundId = SoundId("sounds/footsteps/footstep-wood.sound");
/// Footstep sound played on concrete.
pub const FOOTSTEP_CONCRETE: SoundId = SoundId("sounds/footsteps/footstep-concrete.sound");
/// Footstep sound played on dirt.
pub const FOOTSTEP_DIRT: SoundId = SoundId("sounds/footsteps/footstep-dirt.sound");

/// Walkable surface material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Grass,
    Wood,
    Concrete,
    Dirt,
    /// Unknown material, or nothing was hit.
    #[default]
    Default,
}

impl SurfaceKind {
    /// Resolve a material resource name (e.g. `"wood"`) into a surface kind.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unrecognised names resolve to [`SurfaceKind::Default`].
    pub fn from_material_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "grass" => SurfaceKind::Grass,
            "wood" => SurfaceKind::Wood,
            "concrete" => SurfaceKind::Concrete,
            "dirt" => SurfaceKind::Dirt,
            _ => SurfaceKind::Default,
        }
    }

    /// The footstep sound for this surface.
    pub fn footstep_sound(self) -> SoundId {
        match self {
            SurfaceKind::Grass => FOOTSTEP_GRASS,
            SurfaceKind::Wood => FOOTSTEP_WOOD,
            SurfaceKind::Concrete => FOOTSTEP_CONCRETE,
            SurfaceKind::Dirt => FOOTSTEP_DIRT,
            SurfaceKind::Default => FOOTSTEP_GRASS,
        }
    }
}
