//! Camera controllers.
//!
//! Discrete key events only flip intent flags in [`InputState`]; the
//! per-frame [`CameraRig::step`] turns whatever flags are held into motion.
//! Pointer motion is applied as it arrives since it is already a delta.

use crate::camera::CameraPose;
use crate::constants::{
    LOOK_SENSITIVITY, MOVE_SPEED, ORBIT_MAX_POLAR, ORBIT_MAX_RADIUS, ORBIT_MIN_POLAR,
    ORBIT_MIN_RADIUS, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_STEP, PITCH_LIMIT, YAW_STEP,
};
use glam::{EulerRot, Quat, Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveAction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    YawLeft,
    YawRight,
}

/// Maps `KeyboardEvent.code` values to movement intents.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyBindings {
    bindings: Vec<(String, MoveAction)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let b = |code: &str, action| (code.to_string(), action);
        Self {
            bindings: vec![
                b("KeyW", MoveAction::Forward),
                b("ArrowUp", MoveAction::Forward),
                b("KeyS", MoveAction::Backward),
                b("ArrowDown", MoveAction::Backward),
                b("KeyA", MoveAction::Left),
                b("ArrowLeft", MoveAction::Left),
                b("KeyD", MoveAction::Right),
                b("ArrowRight", MoveAction::Right),
                b("Space", MoveAction::Up),
                b("KeyC", MoveAction::Down),
                b("KeyQ", MoveAction::YawLeft),
                b("KeyE", MoveAction::YawRight),
            ],
        }
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `code`, replacing any previous binding of the same code.
    pub fn bind(&mut self, code: &str, action: MoveAction) {
        self.bindings.retain(|(c, _)| c != code);
        self.bindings.push((code.to_string(), action));
    }

    pub fn action_for(&self, code: &str) -> Option<MoveAction> {
        self.bindings
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, a)| *a)
    }
}

/// Held movement intents. Written by key handlers, read by the frame step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
}

impl InputState {
    pub fn set(&mut self, action: MoveAction, held: bool) {
        let flag = match action {
            MoveAction::Forward => &mut self.forward,
            MoveAction::Backward => &mut self.backward,
            MoveAction::Left => &mut self.left,
            MoveAction::Right => &mut self.right,
            MoveAction::Up => &mut self.up,
            MoveAction::Down => &mut self.down,
            MoveAction::YawLeft => &mut self.yaw_left,
            MoveAction::YawRight => &mut self.yaw_right,
        };
        *flag = held;
    }

    pub fn clear(&mut self) {
        *self = InputState::default();
    }

    pub fn any(&self) -> bool {
        *self != InputState::default()
    }

    /// Net yaw direction: +1 turning left, -1 turning right.
    pub fn yaw_axis(&self) -> f32 {
        (self.yaw_left as i32 - self.yaw_right as i32) as f32
    }
}

/// Routes keyboard events into an [`InputState`] under the typing policy:
/// while a text field has focus, key-down never arms movement, key-up
/// always disarms, and gaining focus drops everything held.
#[derive(Clone, Debug, Default)]
pub struct KeyRouter {
    pub bindings: KeyBindings,
    pub state: InputState,
    typing: bool,
}

impl KeyRouter {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            state: InputState::default(),
            typing: false,
        }
    }

    /// Returns true when the key was consumed as a movement key.
    pub fn key_down(&mut self, code: &str, in_text_field: bool) -> bool {
        if in_text_field || self.typing {
            return false;
        }
        match self.bindings.action_for(code) {
            Some(action) => {
                self.state.set(action, true);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(action) = self.bindings.action_for(code) {
            self.state.set(action, false);
        }
    }

    pub fn set_typing(&mut self, typing: bool) {
        if typing {
            self.state.clear();
        }
        self.typing = typing;
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Window lost focus: key-up events will never arrive.
    pub fn release_all(&mut self) {
        self.state.clear();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlScheme {
    #[default]
    Orbit,
    Fly,
    PointerLock,
}

impl ControlScheme {
    pub fn from_name(name: &str) -> Option<ControlScheme> {
        match name.to_ascii_lowercase().as_str() {
            "orbit" => Some(ControlScheme::Orbit),
            "fly" | "wasd" => Some(ControlScheme::Fly),
            "pointerlock" | "pointer-lock" | "fps" => Some(ControlScheme::PointerLock),
            _ => None,
        }
    }
}

/// Sum the unit vectors of held movement flags, normalize once, scale.
/// `forward` and `right` are expected horizontal and of unit length.
pub fn movement_vector(input: &InputState, forward: Vec3, right: Vec3, speed: f32) -> Vec3 {
    let mut dirs: SmallVec<[Vec3; 6]> = SmallVec::new();
    if input.forward {
        dirs.push(forward);
    }
    if input.backward {
        dirs.push(-forward);
    }
    if input.right {
        dirs.push(right);
    }
    if input.left {
        dirs.push(-right);
    }
    if input.up {
        dirs.push(Vec3::Y);
    }
    if input.down {
        dirs.push(Vec3::NEG_Y);
    }
    let sum: Vec3 = dirs.iter().copied().sum();
    sum.normalize_or_zero() * speed
}

/// First-person camera: yaw about world Y, pitch about the local X axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub yaw_step: f32,
}

impl FlyCamera {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let d = (target - eye).normalize_or_zero();
        let yaw = (-d.x).atan2(-d.z);
        let pitch = d.y.clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            position: eye,
            yaw,
            pitch,
            speed: MOVE_SPEED,
            yaw_step: YAW_STEP,
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Horizontal look direction (pitch ignored) so W never climbs.
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn flat_right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    pub fn step(&mut self, input: &InputState) {
        self.yaw += input.yaw_axis() * self.yaw_step;
        let fwd = self.flat_forward();
        let right = self.flat_right();
        self.position += movement_vector(input, fwd, right, self.speed);
    }

    /// Pointer motion in pixels; moving right turns right, moving down looks down.
    pub fn look(&mut self, delta_px: Vec2) {
        self.yaw -= delta_px.x * LOOK_SENSITIVITY;
        self.pitch = (self.pitch - delta_px.y * LOOK_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.orientation())
    }
}

/// Orbit camera on a sphere around `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Angle around +Y measured from +Z.
    pub azimuth: f32,
    /// Angle from +Y.
    pub polar: f32,
}

impl OrbitCamera {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().clamp(ORBIT_MIN_RADIUS, ORBIT_MAX_RADIUS);
        let azimuth = offset.x.atan2(offset.z);
        let polar = if offset.length() > 0.0 {
            (offset.y / offset.length()).clamp(-1.0, 1.0).acos()
        } else {
            std::f32::consts::FRAC_PI_2
        };
        Self {
            target,
            radius,
            azimuth,
            polar: polar.clamp(ORBIT_MIN_POLAR, ORBIT_MAX_POLAR),
        }
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.polar.sin();
        self.target
            + Vec3::new(
                self.radius * s * self.azimuth.sin(),
                self.radius * self.polar.cos(),
                self.radius * s * self.azimuth.cos(),
            )
    }

    /// Pointer drag in pixels: right drag swings the camera left around the target.
    pub fn rotate(&mut self, delta_px: Vec2) {
        self.azimuth -= delta_px.x * ORBIT_ROTATE_SPEED;
        self.polar =
            (self.polar - delta_px.y * ORBIT_ROTATE_SPEED).clamp(ORBIT_MIN_POLAR, ORBIT_MAX_POLAR);
    }

    /// Positive `notches` zoom out.
    pub fn zoom(&mut self, notches: f32) {
        let factor = ORBIT_ZOOM_STEP.powf(-notches);
        self.radius = (self.radius * factor).clamp(ORBIT_MIN_RADIUS, ORBIT_MAX_RADIUS);
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::looking_at(self.eye(), self.target)
    }
}

/// The active controller. Owns the only mutable camera state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraRig {
    Orbit(OrbitCamera),
    Fly(FlyCamera),
    PointerLock(FlyCamera),
}

impl CameraRig {
    pub fn new(scheme: ControlScheme, eye: Vec3, target: Vec3) -> Self {
        match scheme {
            ControlScheme::Orbit => CameraRig::Orbit(OrbitCamera::looking_at(eye, target)),
            ControlScheme::Fly => CameraRig::Fly(FlyCamera::looking_at(eye, target)),
            ControlScheme::PointerLock => {
                CameraRig::PointerLock(FlyCamera::looking_at(eye, target))
            }
        }
    }

    pub fn scheme(&self) -> ControlScheme {
        match self {
            CameraRig::Orbit(_) => ControlScheme::Orbit,
            CameraRig::Fly(_) => ControlScheme::Fly,
            CameraRig::PointerLock(_) => ControlScheme::PointerLock,
        }
    }

    /// Per-frame integration of held keys. Orbit ignores movement keys.
    pub fn step(&mut self, input: &InputState) {
        match self {
            CameraRig::Orbit(_) => {}
            CameraRig::Fly(cam) | CameraRig::PointerLock(cam) => cam.step(input),
        }
    }

    /// Pointer drag (orbit, fly) in pixels.
    pub fn drag(&mut self, delta_px: Vec2) {
        match self {
            CameraRig::Orbit(cam) => cam.rotate(delta_px),
            CameraRig::Fly(cam) => cam.look(Vec2::new(delta_px.x, 0.0)),
            CameraRig::PointerLock(_) => {}
        }
    }

    /// Relative mouse motion while the pointer is locked.
    pub fn locked_look(&mut self, delta_px: Vec2) {
        if let CameraRig::PointerLock(cam) = self {
            cam.look(delta_px);
        }
    }

    pub fn wheel(&mut self, notches: f32) {
        if let CameraRig::Orbit(cam) = self {
            cam.zoom(notches);
        }
    }

    pub fn pose(&self) -> CameraPose {
        match self {
            CameraRig::Orbit(cam) => cam.pose(),
            CameraRig::Fly(cam) | CameraRig::PointerLock(cam) => cam.pose(),
        }
    }
}
