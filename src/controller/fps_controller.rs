//! First-person controller: yaw on the body, pitch on a camera node, gravity
//! and walking handed to a [`CapsuleMover`].
//!
//! All per-frame math lives in [`step`], a pure function of the config, the
//! previous state and the sampled inputs. [`FpsController`] wraps it with the
//! component lifecycle (activate, deactivate, update) and the scene writes.

use glam::{Quat, Vec2, Vec3};
use tracing::{debug, trace};

use super::config::ControllerConfig;
use super::input::AxisSource;
use super::physics::CapsuleMover;
use crate::error::{ControllerError, Result};
use crate::model::{pitch_rotation, yaw_rotation, NodeId, Scene, Transform};

/// Mutable per-frame state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerState {
    /// Degrees about +Y, never wrapped
    pub yaw: f32,
    /// Degrees about +X, kept within the configured limits
    pub pitch: f32,
    pub vertical_velocity: f32,
}

/// Everything sampled from the outside world for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub look: Vec2,
    pub movement: Vec2,
    pub grounded: bool,
    pub has_camera: bool,
    pub dt: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    pub state: ControllerState,
    pub body_rotation: Quat,
    /// `None` when there is no camera to pitch
    pub camera_rotation: Option<Quat>,
    /// Requested motion for the mover, already multiplied by `dt`
    pub displacement: Vec3,
}

/// Advance the controller by one frame.
pub fn step(config: &ControllerConfig, state: ControllerState, input: &FrameInput) -> StepOutput {
    let mut next = state;

    let look_scale = if config.look_uses_frame_time { input.dt } else { 1.0 };
    let yaw_delta = input.look.x * config.look_sensitivity * look_scale;
    let pitch_delta = input.look.y * config.look_sensitivity * look_scale;

    next.yaw += yaw_delta;
    let body_rotation = yaw_rotation(next.yaw);

    let camera_rotation = if input.has_camera {
        next.pitch = (next.pitch - pitch_delta).clamp(config.pitch_min, config.pitch_max);
        Some(pitch_rotation(next.pitch))
    } else {
        None
    };

    let basis = Transform::IDENTITY.with_rotation(body_rotation);
    let move_dir = basis.right() * input.movement.x + basis.forward() * input.movement.y;

    if input.grounded && next.vertical_velocity < 0.0 {
        next.vertical_velocity = config.grounded_vertical_velocity;
    }
    next.vertical_velocity += config.gravity * input.dt;

    let velocity = move_dir * config.move_speed + Vec3::new(0.0, next.vertical_velocity, 0.0);

    StepOutput {
        state: next,
        body_rotation,
        camera_rotation,
        displacement: velocity * input.dt,
    }
}

/// What one `update` did, for logging and inspection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub displacement: Vec3,
    /// Grounded flag as seen before the move
    pub was_grounded: bool,
    pub grounded: bool,
}

/// A first-person controller bound to a body node in a [`Scene`].
///
/// The mover is required; the camera and both input axes are optional. A
/// missing axis reads zero and a missing camera leaves pitch untouched.
pub struct FpsController<M: CapsuleMover> {
    config: ControllerConfig,
    state: ControllerState,
    body: NodeId,
    camera: Option<NodeId>,
    mover: M,
    move_axis: Option<Box<dyn AxisSource>>,
    look_axis: Option<Box<dyn AxisSource>>,
    active: bool,
}

impl<M: CapsuleMover> FpsController<M> {
    /// Wire a controller to `body`.
    ///
    /// When `camera` is `None` the first camera in the body's hierarchy is
    /// adopted, the body itself included. A camera that turns out to be the
    /// body is dropped. The body's current heading becomes the starting yaw.
    pub fn new(
        config: ControllerConfig,
        scene: &Scene,
        body: NodeId,
        camera: Option<NodeId>,
        mover: M,
    ) -> Result<Self> {
        config.validate()?;

        let body_transform = scene.local(body).ok_or(ControllerError::UnknownNode(body))?;
        if let Some(cam) = camera {
            if !scene.contains(cam) {
                return Err(ControllerError::UnknownNode(cam));
            }
        }

        let camera = camera
            .or_else(|| scene.find_camera_in_hierarchy(body))
            .filter(|cam| *cam != body);

        let yaw = body_transform.yaw_degrees();
        debug!(%body, camera = ?camera, yaw, "fps controller initialized");

        Ok(Self {
            config,
            state: ControllerState {
                yaw,
                ..ControllerState::default()
            },
            body,
            camera,
            mover,
            move_axis: None,
            look_axis: None,
            active: false,
        })
    }

    pub fn with_move_axis(mut self, axis: impl AxisSource + 'static) -> Self {
        self.move_axis = Some(Box::new(axis));
        self
    }

    pub fn with_look_axis(mut self, axis: impl AxisSource + 'static) -> Self {
        self.look_axis = Some(Box::new(axis));
        self
    }

    /// Enable the bound input axes. Idempotent.
    pub fn on_activate(&mut self) {
        if let Some(axis) = self.move_axis.as_mut() {
            axis.enable();
        }
        if let Some(axis) = self.look_axis.as_mut() {
            axis.enable();
        }
        self.active = true;
        debug!(body = %self.body, "fps controller activated");
    }

    /// Disable the bound input axes. Idempotent.
    pub fn on_deactivate(&mut self) {
        if let Some(axis) = self.move_axis.as_mut() {
            axis.disable();
        }
        if let Some(axis) = self.look_axis.as_mut() {
            axis.disable();
        }
        self.active = false;
        debug!(body = %self.body, "fps controller deactivated");
    }

    /// Run one frame. Returns `None` while the controller is inactive.
    pub fn update(&mut self, scene: &mut Scene, dt: f32) -> Option<FrameReport> {
        if !self.active {
            return None;
        }

        let look = self.look_axis.as_mut().map_or(Vec2::ZERO, |a| a.read());
        let movement = self.move_axis.as_mut().map_or(Vec2::ZERO, |a| a.read());
        let was_grounded = self.mover.is_grounded();

        let input = FrameInput {
            look,
            movement,
            grounded: was_grounded,
            has_camera: self.camera.is_some(),
            dt,
        };
        let out = step(&self.config, self.state, &input);
        self.state = out.state;

        if let (Some(cam), Some(rotation)) = (self.camera, out.camera_rotation) {
            if let Some(local) = scene.local_mut(cam) {
                local.rotation = rotation;
            }
        }

        // The body was validated at construction and scenes never drop nodes
        let body = scene.local_mut(self.body)?;
        body.rotation = out.body_rotation;
        self.mover.move_by(body, out.displacement);

        let report = FrameReport {
            displacement: out.displacement,
            was_grounded,
            grounded: self.mover.is_grounded(),
        };
        trace!(
            yaw = self.state.yaw,
            pitch = self.state.pitch,
            vertical_velocity = self.state.vertical_velocity,
            grounded = report.grounded,
            "fps controller frame"
        );
        Some(report)
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn camera(&self) -> Option<NodeId> {
        self.camera
    }

    pub fn mover(&self) -> &M {
        &self.mover
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_grounded(&self) -> bool {
        self.mover.is_grounded()
    }
}
