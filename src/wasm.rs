use glam::{Vec2, Vec3};
use wasm_bindgen::prelude::*;

use crate::controller::{ControllerConfig, FlatGroundMover, FpsController, HostAxis};
use crate::model::{NodeId, NodeKind, Scene, Transform};

/// Self-contained controller on a flat floor for JavaScript hosts.
///
/// The page feeds raw axis values each frame; the body and camera live in a
/// private scene.
#[wasm_bindgen]
pub struct WasmFpsController {
    scene: Scene,
    body: NodeId,
    controller: FpsController<FlatGroundMover>,
    move_axis: HostAxis,
    look_axis: HostAxis,
}

#[wasm_bindgen]
impl WasmFpsController {
    /// Create a controller standing at (`x`, `z`) above a floor at `ground_height`
    ///
    /// # Arguments
    /// * `eye_height` - Camera offset above the body center
    #[wasm_bindgen(constructor)]
    pub fn new(x: f32, z: f32, ground_height: f32, eye_height: f32) -> Result<WasmFpsController, JsValue> {
        crate::logging::init();

        let mover = FlatGroundMover::new(ground_height);
        let mut scene = Scene::new();
        let body = scene.spawn(
            "player",
            NodeKind::Empty,
            Transform::from_position(Vec3::new(x, mover.rest_height(), z)),
        );
        scene
            .spawn_child(body, "eye", NodeKind::Camera, Transform::from_position(Vec3::Y * eye_height))
            .ok_or_else(|| JsValue::from_str("failed to attach camera"))?;

        let move_axis = HostAxis::new();
        let look_axis = HostAxis::new();
        let mut controller = FpsController::new(ControllerConfig::default(), &scene, body, None, mover)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .with_move_axis(move_axis.clone())
            .with_look_axis(look_axis.clone());
        controller.on_activate();

        Ok(Self {
            scene,
            body,
            controller,
            move_axis,
            look_axis,
        })
    }

    /// Advance one frame
    ///
    /// # Arguments
    /// * `look_x`, `look_y` - Look axis (turn right, look up)
    /// * `move_x`, `move_y` - Move axis (strafe right, forward)
    /// * `dt` - Time step in seconds
    #[wasm_bindgen(js_name = update)]
    pub fn update(&mut self, look_x: f32, look_y: f32, move_x: f32, move_y: f32, dt: f32) {
        self.look_axis.set(Vec2::new(look_x, look_y));
        self.move_axis.set(Vec2::new(move_x, move_y));
        self.controller.update(&mut self.scene, dt);
    }

    /// Body position as `[x, y, z]`
    #[wasm_bindgen(js_name = position)]
    pub fn position(&self) -> Vec<f32> {
        self.scene
            .local(self.body)
            .map(|t| t.position.to_array().to_vec())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = yaw)]
    pub fn yaw(&self) -> f32 {
        self.controller.state().yaw
    }

    #[wasm_bindgen(js_name = pitch)]
    pub fn pitch(&self) -> f32 {
        self.controller.state().pitch
    }

    #[wasm_bindgen(js_name = isGrounded)]
    pub fn is_grounded(&self) -> bool {
        self.controller.is_grounded()
    }

    #[wasm_bindgen(js_name = setActive)]
    pub fn set_active(&mut self, active: bool) {
        if active {
            self.controller.on_activate();
        } else {
            self.controller.on_deactivate();
        }
    }
}
