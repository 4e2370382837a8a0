//! Look-at camera producing left-handed view and projection matrices

use super::math::{Mat4, Vec3};

/// Camera state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, width: usize, height: usize) -> Mat4 {
        let aspect = width as f32 / height.max(1) as f32;
        Mat4::perspective_lh(self.fov, aspect, self.znear, self.zfar)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, -12.0),
            target: Vec3::ZERO,
            fov: 0.78,
            znear: 0.01,
            zfar: 1.0,
        }
    }
}
