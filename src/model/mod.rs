// MODEL: Scene nodes, transforms and camera projection
pub mod camera;
pub mod scene;
pub mod transform;

pub use camera::Camera;
pub use scene::{Node, NodeId, NodeKind, Scene};
pub use transform::{pitch_rotation, yaw_rotation, Transform};
