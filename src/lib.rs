//! First-person character controller.
//!
//! Look input turns the body (yaw) and tilts a camera node (pitch), move
//! input walks along the body's ground-plane basis, and gravity pulls the
//! body down. Collision is left to a [`controller::CapsuleMover`].
//!
//! ```no_run
//! use fps_rig::controller::{ControllerConfig, FlatGroundMover, FpsController, ScriptedAxis};
//! use fps_rig::model::{NodeKind, Scene, Transform};
//! use glam::{Vec2, Vec3};
//!
//! let mut scene = Scene::new();
//! let body = scene.spawn("player", NodeKind::Empty, Transform::from_position(Vec3::Y * 3.0));
//! scene.spawn_child(body, "eye", NodeKind::Camera, Transform::from_position(Vec3::Y * 0.7));
//!
//! let mut controller =
//!     FpsController::new(ControllerConfig::default(), &scene, body, None, FlatGroundMover::default())?
//!         .with_move_axis(ScriptedAxis::constant(Vec2::Y));
//! controller.on_activate();
//! controller.update(&mut scene, 1.0 / 60.0);
//! # Ok::<(), fps_rig::ControllerError>(())
//! ```

pub mod error;
pub mod logging;

// MVC Architecture (no view: rendering belongs to the host)
pub mod controller;
pub mod model;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use controller::{ControllerConfig, FpsController};
pub use error::ControllerError;

// Re-export for convenience
pub use glam;
