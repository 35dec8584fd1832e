use glam::{Mat4, Vec3};

/// Default heading: -90 degrees so the camera starts looking down -Z.
pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const MOVEMENT_SPEED: f32 = 2.5;
pub const MOUSE_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch is clamped here so the view never flips past vertical.
pub const PITCH_LIMIT: f32 = 89.0;
/// Zoom (vertical field of view, degrees) stays inside this range to keep
/// the projection matrix well-conditioned.
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

/// Discrete movement directions sampled from the keyboard each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-fly camera: position plus a yaw/pitch orientation in degrees.
///
/// The basis vectors `front`, `right` and `up` are derived state. `front`
/// is recomputed from yaw/pitch on every orientation change; `right` and
/// `up` follow from cross products against the fixed world up, so the
/// three always form an orthonormal right-handed frame.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            zoom: DEFAULT_ZOOM,
            movement_speed: MOVEMENT_SPEED,
            mouse_sensitivity: MOUSE_SENSITIVITY,
        };
        camera.update_vectors();
        camera
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Translate along the current basis. `delta` is the frame time in
    /// seconds, so movement speed is independent of frame rate.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta: f32) {
        let velocity = self.movement_speed * delta;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Apply cursor deltas to yaw/pitch. The caller supplies `yoffset`
    /// already inverted (cursor up = positive = pitch up).
    pub fn process_mouse_movement(&mut self, xoffset: f32, yoffset: f32, constrain_pitch: bool) {
        self.yaw += xoffset * self.mouse_sensitivity;
        self.pitch += yoffset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Scroll-wheel zoom. Scrolling up (positive `yoffset`) narrows the
    /// field of view.
    pub fn process_mouse_scroll(&mut self, yoffset: f32) {
        self.zoom = (self.zoom - yoffset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Right-handed look-at matrix from the current state. Pure: no state
    /// is touched.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
