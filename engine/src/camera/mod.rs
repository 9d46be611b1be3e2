//! Camera Module
//!
//! Head mouse-look and view camera placement. Window-system agnostic: it
//! only deals with camera state and math, plus ray casts through
//! [`PhysicsWorld`](crate::physics::PhysicsWorld) for occlusion.

pub mod head;
pub mod rig;

pub use head::{DEFAULT_PITCH_LIMIT_DEG, HeadOrientation};
pub use rig::{CameraMode, CameraRig, CameraState, CameraTransform};
