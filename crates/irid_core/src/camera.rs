use glam::{Mat4, Vec3};

/// Movement direction requested for one integration step.
///
/// Diagonals are distinct variants (not two cardinals applied together) so
/// the camera can scale them by `1/√2` and keep diagonal speed equal to
/// axis-aligned speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

/// Free fly camera driven by yaw/pitch angles (in degrees).
///
/// The derived `front`/`right`/`up` basis is recomputed whenever an angle
/// changes; `view_matrix` looks from `position` along `front`.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,

    /// Translation units per second.
    pub speed: f32,
    /// Degrees of rotation per pixel of mouse movement.
    pub sensitivity: f32,
    /// Vertical field of view in degrees, adjusted by the scroll wheel.
    zoom: f32,
}

impl Camera {
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up,
            yaw,
            pitch,
            speed: 25.0,
            sensitivity: 0.1,
            zoom: 45.0,
        };
        camera.update_vectors();
        camera
    }

    /// View matrix looking from `position` along the current front vector.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Applies one keyboard integration step of `dt` seconds.
    ///
    /// Diagonal variants move along both axes at `speed · dt · 1/√2` each so
    /// the total displacement magnitude matches a single-axis step.
    pub fn process_keyboard(&mut self, direction: CameraMovement, dt: f32) {
        use std::f32::consts::FRAC_1_SQRT_2;

        let velocity = self.speed * dt;
        let diagonal = velocity * FRAC_1_SQRT_2;

        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::ForwardLeft => {
                self.position += self.front * diagonal;
                self.position -= self.right * diagonal;
            }
            CameraMovement::ForwardRight => {
                self.position += self.front * diagonal;
                self.position += self.right * diagonal;
            }
            CameraMovement::BackwardLeft => {
                self.position -= self.front * diagonal;
                self.position -= self.right * diagonal;
            }
            CameraMovement::BackwardRight => {
                self.position -= self.front * diagonal;
                self.position += self.right * diagonal;
            }
        }
    }

    /// Applies a raw mouse delta (pixels) to yaw/pitch.
    ///
    /// Pitch is clamped to ±89° to keep the look direction from flipping
    /// over the world-up axis.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-89.0, 89.0);
        self.update_vectors();
    }

    /// Scroll-wheel zoom, clamped to [1°, 45°].
    pub fn process_mouse_scroll(&mut self, dy: f32) {
        self.zoom = (self.zoom - dy).clamp(1.0, 45.0);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::Y, 90.0, 0.0)
    }

    #[test]
    fn diagonal_speed_matches_axis_speed() {
        let (dt, speed) = (0.5, 25.0);

        let mut straight = camera();
        straight.process_keyboard(CameraMovement::Forward, dt);
        let straight_len = straight.position.length();

        let mut diagonal = camera();
        diagonal.process_keyboard(CameraMovement::ForwardLeft, dt);

        // each axis contributes speed * dt / sqrt(2)
        let per_axis = speed * dt * std::f32::consts::FRAC_1_SQRT_2;
        assert!((diagonal.position.dot(diagonal.front).abs() - per_axis).abs() < 1e-4);
        assert!((diagonal.position.dot(diagonal.right).abs() - per_axis).abs() < 1e-4);

        // total diagonal displacement equals the single-axis displacement
        assert!((diagonal.position.length() - straight_len).abs() < 1e-4);
        assert!((straight_len - speed * dt).abs() < 1e-4);
    }

    #[test]
    fn all_four_diagonals_normalised() {
        for dir in [
            CameraMovement::ForwardLeft,
            CameraMovement::ForwardRight,
            CameraMovement::BackwardLeft,
            CameraMovement::BackwardRight,
        ] {
            let mut cam = camera();
            cam.process_keyboard(dir, 1.0);
            assert!((cam.position.length() - cam.speed).abs() < 1e-4, "{dir:?}");
        }
    }

    #[test]
    fn pitch_clamped() {
        let mut cam = camera();
        cam.process_mouse_movement(0.0, 10_000.0);
        assert!(cam.front.y <= 89.0f32.to_radians().sin() + 1e-5);
        cam.process_mouse_movement(0.0, -100_000.0);
        assert!(cam.front.y >= -(89.0f32.to_radians().sin() + 1e-5));
    }

    #[test]
    fn zoom_clamped() {
        let mut cam = camera();
        cam.process_mouse_scroll(100.0);
        assert_eq!(cam.zoom(), 1.0);
        cam.process_mouse_scroll(-100.0);
        assert_eq!(cam.zoom(), 45.0);
    }
}
