//! Vector math helpers for the scanline rasterizer
//!
//! Vectors and matrices come from glam; this module holds the small pieces
//! the pipeline needs on top of it.

pub use glam::{EulerRot, Mat4, Vec2, Vec3};

/// Clamp a value into [0, 1]
pub fn clamp01(value: f32) -> f32 {
    value.max(0.0).min(1.0)
}

/// Interpolate between `min` and `max`; `gradient` is clamped to [0, 1]
pub fn interpolate(min: f32, max: f32, gradient: f32) -> f32 {
    min + (max - min) * clamp01(gradient)
}

/// Normalize, mapping zero-length (or non-finite length) vectors to zero
pub fn safe_normalize(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// 2D cross product (z component of the 3D cross of two XY vectors)
pub fn cross_2d(x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    x0 * y1 - x1 * y0
}

/// Which side of the screen-space line `from -> to` the point `p` is on.
/// Positive when `p` lies to the right in a Y-down screen.
pub fn line_side_2d(p: Vec3, from: Vec3, to: Vec3) -> f32 {
    cross_2d(p.x - from.x, p.y - from.y, to.x - from.x, to.y - from.y)
}

/// Transform a point by a matrix, including the perspective divide
pub fn transform_coordinate(v: Vec3, m: &Mat4) -> Vec3 {
    m.project_point3(v)
}

/// World matrix for a mesh: yaw/pitch/roll rotation first, then translation.
/// `rotation` holds Euler angles as (pitch, yaw, roll) in its (x, y, z).
pub fn world_matrix(position: Vec3, rotation: Vec3) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z)
}
