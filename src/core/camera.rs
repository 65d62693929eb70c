//! Pointer-following camera rig.

use glam::{Mat4, Vec2, Vec3};

use super::constants::*;

/// Right-handed perspective camera that eases toward the pointer target and
/// always re-aims at the origin.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub eye: Vec3,
    pointer_target: Vec2,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraRig {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            pointer_target: Vec2::ZERO,
            aspect: if aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: CAMERA_FOVY,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Recompute the aspect ratio from the viewport. Must be called on every
    /// viewport change; degenerate sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Two-stage exponential smoothing toward the scaled pointer target.
    /// Per-frame factors in (0, 1], so the approach never overshoots.
    pub fn follow(&mut self, pointer: Vec2) {
        self.pointer_target += (pointer - self.pointer_target) * POINTER_SMOOTHING;
        self.eye.x += (self.pointer_target.x * CAMERA_TRAVEL - self.eye.x) * CAMERA_SMOOTHING;
        self.eye.y += (self.pointer_target.y * CAMERA_TRAVEL - self.eye.y) * CAMERA_SMOOTHING;
    }

    pub fn pointer_target(&self) -> Vec2 {
        self.pointer_target
    }

    /// World-to-view transform, aimed at the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
