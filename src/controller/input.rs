/// Platform-agnostic input handling system
use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use glam::Vec2;

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    // Keyboard events
    KeyDown(String),
    KeyUp(String),

    // Mouse events
    MouseMove { dx: f32, dy: f32 },

    // Window events
    FocusLost,
    VisibilityChanged { visible: bool },
    PointerLockChanged { locked: bool },
}

/// Raw input gathered between two frames
#[derive(Debug, Default)]
pub struct InputState {
    pub pressed_keys: HashSet<String>,
    pub look_delta: (f32, f32),
    pub pointer_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedInput {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::MouseMove { dx, dy } => {
                if self.pointer_locked {
                    self.look_delta.0 += dx;
                    self.look_delta.1 += dy;
                }
            }
            InputEvent::FocusLost | InputEvent::VisibilityChanged { .. } => {
                self.clear_keys();
            }
            InputEvent::PointerLockChanged { locked } => {
                self.pointer_locked = *locked;
                if !locked {
                    self.look_delta = (0.0, 0.0);
                }
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }

    pub fn consume_look(&mut self) -> (f32, f32) {
        let result = self.look_delta;
        self.look_delta = (0.0, 0.0);
        result
    }
}

/// Input state shared between the platform event handlers and the axis bindings
pub type SharedInput = Rc<RefCell<InputState>>;

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            backward: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
        }
    }
}

impl KeyBindings {
    fn held(input: &InputState, key: &str, alias: &str) -> bool {
        input.is_key_pressed(key)
            || input.is_key_pressed(&key.to_uppercase())
            || input.is_key_pressed(alias)
    }

    pub fn is_moving_forward(&self, input: &InputState) -> bool {
        Self::held(input, &self.forward, "ArrowUp")
    }

    pub fn is_moving_backward(&self, input: &InputState) -> bool {
        Self::held(input, &self.backward, "ArrowDown")
    }

    pub fn is_moving_left(&self, input: &InputState) -> bool {
        Self::held(input, &self.left, "ArrowLeft")
    }

    pub fn is_moving_right(&self, input: &InputState) -> bool {
        Self::held(input, &self.right, "ArrowRight")
    }
}

/// A bindable 2D input axis polled once per frame.
///
/// A disabled axis always reads zero.
pub trait AxisSource {
    fn enable(&mut self);
    fn disable(&mut self);
    fn is_enabled(&self) -> bool;
    fn read(&mut self) -> Vec2;
}

/// WASD-style strafe/forward axis: x is strafe right, y is forward.
pub struct KeyboardMoveAxis {
    input: SharedInput,
    bindings: KeyBindings,
    enabled: bool,
}

impl KeyboardMoveAxis {
    pub fn new(input: SharedInput, bindings: KeyBindings) -> Self {
        Self {
            input,
            bindings,
            enabled: false,
        }
    }
}

impl AxisSource for KeyboardMoveAxis {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn read(&mut self) -> Vec2 {
        if !self.enabled {
            return Vec2::ZERO;
        }
        let input = self.input.borrow();
        let b = &self.bindings;
        let mut axis = Vec2::ZERO;
        if b.is_moving_right(&input) {
            axis.x += 1.0;
        }
        if b.is_moving_left(&input) {
            axis.x -= 1.0;
        }
        if b.is_moving_forward(&input) {
            axis.y += 1.0;
        }
        if b.is_moving_backward(&input) {
            axis.y -= 1.0;
        }
        // Diagonals are not faster than straight lines
        axis.normalize_or_zero()
    }
}

/// Mouse-delta look axis: x is turn right, y is look up.
pub struct MouseLookAxis {
    input: SharedInput,
    /// Look units per pixel of mouse travel
    pub scale: f32,
    enabled: bool,
}

impl MouseLookAxis {
    pub fn new(input: SharedInput, scale: f32) -> Self {
        Self {
            input,
            scale,
            enabled: false,
        }
    }
}

impl AxisSource for MouseLookAxis {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
        // Drop motion gathered while the binding was live
        self.input.borrow_mut().consume_look();
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn read(&mut self) -> Vec2 {
        if !self.enabled {
            return Vec2::ZERO;
        }
        let (dx, dy) = self.input.borrow_mut().consume_look();
        // Screen y grows downward
        Vec2::new(dx, -dy) * self.scale
    }
}

/// Replays queued samples, then keeps returning `held`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedAxis {
    queue: VecDeque<Vec2>,
    pub held: Vec2,
    enabled: bool,
}

impl ScriptedAxis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: Vec2) -> Self {
        Self {
            held: value,
            ..Self::default()
        }
    }

    pub fn push(&mut self, sample: Vec2) {
        self.queue.push_back(sample);
    }

    pub fn with_samples(mut self, samples: impl IntoIterator<Item = Vec2>) -> Self {
        self.queue.extend(samples);
        self
    }
}

impl AxisSource for ScriptedAxis {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn read(&mut self) -> Vec2 {
        if !self.enabled {
            return Vec2::ZERO;
        }
        self.queue.pop_front().unwrap_or(self.held)
    }
}

/// Axis whose value is pushed by the host, e.g. a gamepad stick or a JS caller.
///
/// Clones share the same value, so the host keeps one and the controller
/// owns the other.
#[derive(Debug, Default, Clone)]
pub struct HostAxis {
    value: Rc<Cell<Vec2>>,
    enabled: bool,
}

impl HostAxis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: Vec2) {
        self.value.set(value);
    }

    pub fn get(&self) -> Vec2 {
        self.value.get()
    }
}

impl AxisSource for HostAxis {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn read(&mut self) -> Vec2 {
        if !self.enabled {
            return Vec2::ZERO;
        }
        self.value.get()
    }
}

impl<A: AxisSource + ?Sized> AxisSource for Box<A> {
    fn enable(&mut self) {
        (**self).enable()
    }

    fn disable(&mut self) {
        (**self).disable()
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn read(&mut self) -> Vec2 {
        (**self).read()
    }
}
