// CONTROLLER: Input, character movement and the update loop
pub mod config;
pub mod fps_controller;
pub mod frame_loop;
pub mod input;
pub mod physics;

pub use config::{ControllerConfig, GROUNDED_VERTICAL_VELOCITY};
pub use fps_controller::{step, ControllerState, FpsController, FrameInput, FrameReport, StepOutput};
pub use frame_loop::{FrameClock, FrameLoop};
pub use input::{
    AxisSource, HostAxis, InputEvent, InputState, KeyBindings, KeyboardMoveAxis, MouseLookAxis, ScriptedAxis,
    SharedInput,
};
pub use physics::{CapsuleMover, FlatGroundMover, WorldBounds};
