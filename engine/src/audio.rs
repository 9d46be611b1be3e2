//! Audio Sink
//!
//! The controller never owns audio playback. It only asks a sink to play a
//! named sound at a world position.

use std::fmt;

use glam::Vec3;

/// Identifier of a sound asset (resource path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub &'static str);

impl SoundId {
    /// The resource path of the sound.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Plays one-shot sounds in the world.
pub trait AudioSink {
    /// Play `sound` at a world-space `position`.
    fn play(&mut self, sound: SoundId, position: Vec3);
}

static_assertions::assert_impl_all!(SoundId: Copy, Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_resource_path() {
        let sound = SoundId("sounds/footsteps/grass.wav");
        assert_eq!(sound.to_string(), "sounds/footsteps/grass.wav");
        assert_eq!(sound.as_str(), sound.0);
    }
}
