use anyhow::Context;
use glam::{Vec2, Vec3};
use tracing::info;

use fps_rig::controller::{
    ControllerConfig, FlatGroundMover, FpsController, FrameLoop, InputEvent, InputState, KeyBindings,
    KeyboardMoveAxis, MouseLookAxis, WorldBounds,
};
use fps_rig::logging;
use fps_rig::model::{Camera, NodeKind, Scene, Transform};

const DT: f32 = 1.0 / 60.0;
const MOUSE_SCALE: f32 = 0.01;

/// Scripted platform events fired at the start of a given frame
fn scripted_events(frame: u64) -> Vec<InputEvent> {
    match frame {
        1 => vec![InputEvent::PointerLockChanged { locked: true }],
        90 => vec![InputEvent::KeyDown("w".into())],
        120..=150 => vec![InputEvent::MouseMove { dx: 6.0, dy: -1.5 }],
        180 => vec![InputEvent::KeyDown("d".into())],
        240 => vec![InputEvent::KeyUp("w".into()), InputEvent::KeyUp("d".into())],
        _ => Vec::new(),
    }
}

/// Headless demo: drop a player onto a flat floor, walk and look around
/// with scripted keyboard and mouse input, and log where it ends up.
fn main() -> anyhow::Result<()> {
    logging::init();

    let mover = FlatGroundMover::new(0.0).with_bounds(WorldBounds {
        min_x: -50.0,
        max_x: 50.0,
        min_z: -50.0,
        max_z: 50.0,
    });

    let mut scene = Scene::new();
    let body = scene.spawn(
        "player",
        NodeKind::Empty,
        Transform::from_position(Vec3::new(0.0, 4.0, 0.0)),
    );
    let eye = scene
        .spawn_child(body, "eye", NodeKind::Camera, Transform::from_position(Vec3::new(0.0, 0.7, 0.0)))
        .context("player node vanished")?;

    let input = InputState::shared();
    let config = ControllerConfig::default().with_look_sensitivity(10.0);
    let mut controller = FpsController::new(config, &scene, body, None, mover)
        .context("failed to set up the controller")?
        .with_move_axis(KeyboardMoveAxis::new(input.clone(), KeyBindings::default()))
        .with_look_axis(MouseLookAxis::new(input.clone(), MOUSE_SCALE));
    controller.on_activate();

    let mut frames = FrameLoop::new(scene, controller);
    let camera = Camera::new(1280, 720);

    for frame in 1..=300u64 {
        for ev in scripted_events(frame) {
            input.borrow_mut().process_event(&ev);
        }
        let Some(report) = frames.step(DT) else { continue };

        if frame % 60 == 0 {
            let pos = frames.scene.local(body).map(|t| t.position).unwrap_or_default();
            let state = frames.controller.state();
            let look = Camera::world_forward(&frames.scene, eye).unwrap_or(Vec3::Z);
            info!(
                frame,
                x = pos.x,
                y = pos.y,
                z = pos.z,
                yaw = state.yaw,
                pitch = state.pitch,
                grounded = report.grounded,
                look = ?look,
                "player"
            );
        }
    }

    frames.controller.on_deactivate();
    let vp = camera
        .view_proj(&frames.scene, eye)
        .context("camera node vanished")?;
    let ahead = vp * (Camera::eye(&frames.scene, eye).unwrap_or_default()
        + Camera::world_forward(&frames.scene, eye).unwrap_or(Vec3::Z) * 5.0)
        .extend(1.0);
    info!(
        screen = ?Vec2::new(ahead.x / ahead.w, ahead.y / ahead.w),
        "point five units ahead projects to the screen center"
    );

    Ok(())
}
