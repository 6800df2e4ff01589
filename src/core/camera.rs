//! Perspective camera and damped orbit controls.
//!
//! These types avoid platform APIs so picking can be exercised on the host.

use super::constants::*;
use super::pick::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vectors spanning the image plane in world space (right, up).
    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        (right, right.cross(forward))
    }

    /// Cast a world-space ray through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (far - self.eye).normalize(),
        }
    }
}

/// Orbit around a target with damped rotation and clamped zoom.
///
/// `rotate` and `zoom` only accumulate deltas; `update` applies a damped share
/// of them once per frame.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    yaw_delta: f32,
    pitch_delta: f32,
    damping: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_DISTANCE,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            damping: ORBIT_DAMPING,
        }
    }
}

impl OrbitControls {
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Queue a rotation from a pointer drag of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.yaw_delta -= std::f32::consts::TAU * dx / h * ORBIT_ROTATE_SPEED;
        self.pitch_delta += std::f32::consts::TAU * dy / h * ORBIT_ROTATE_SPEED;
    }

    /// Zoom by a wheel delta; positive values move away from the target.
    pub fn zoom(&mut self, wheel_delta: f32) {
        let factor = (1.0 + wheel_delta * ORBIT_ZOOM_SPEED).max(0.1);
        self.distance = (self.distance * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    pub fn update(&mut self) {
        self.yaw += self.yaw_delta * self.damping;
        self.pitch = (self.pitch + self.pitch_delta * self.damping)
            .clamp(-ORBIT_MAX_PITCH, ORBIT_MAX_PITCH);
        self.yaw_delta *= 1.0 - self.damping;
        self.pitch_delta *= 1.0 - self.damping;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cp * sy, sp, cp * cy)
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}
