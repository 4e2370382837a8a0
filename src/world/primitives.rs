//! Procedural meshes for demos and tests

use super::mesh::Mesh;
use crate::rasterizer::{Face, Vec2, Vec3, Vertex};

/// Axis-aligned box centered on its local origin, with the given half extents.
/// Each side has its own four vertices so normals stay flat per face.
pub fn create_box(name: &str, hx: f32, hy: f32, hz: f32) -> Mesh {
    let mut vertices = Vec::with_capacity(24);
    let mut faces = Vec::with_capacity(12);

    // (normal, corners) per side, corners wound consistently
    let sides: [(Vec3, [Vec3; 4]); 6] = [
        // Front (-Z, towards a camera on the negative Z axis)
        (
            Vec3::new(0.0, 0.0, -1.0),
            [
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(-hx, hy, -hz),
                Vec3::new(hx, hy, -hz),
                Vec3::new(hx, -hy, -hz),
            ],
        ),
        // Back
        (
            Vec3::new(0.0, 0.0, 1.0),
            [
                Vec3::new(hx, -hy, hz),
                Vec3::new(hx, hy, hz),
                Vec3::new(-hx, hy, hz),
                Vec3::new(-hx, -hy, hz),
            ],
        ),
        // Top
        (
            Vec3::new(0.0, 1.0, 0.0),
            [
                Vec3::new(-hx, hy, -hz),
                Vec3::new(-hx, hy, hz),
                Vec3::new(hx, hy, hz),
                Vec3::new(hx, hy, -hz),
            ],
        ),
        // Bottom
        (
            Vec3::new(0.0, -1.0, 0.0),
            [
                Vec3::new(-hx, -hy, hz),
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(hx, -hy, -hz),
                Vec3::new(hx, -hy, hz),
            ],
        ),
        // Right
        (
            Vec3::new(1.0, 0.0, 0.0),
            [
                Vec3::new(hx, -hy, -hz),
                Vec3::new(hx, hy, -hz),
                Vec3::new(hx, hy, hz),
                Vec3::new(hx, -hy, hz),
            ],
        ),
        // Left
        (
            Vec3::new(-1.0, 0.0, 0.0),
            [
                Vec3::new(-hx, -hy, hz),
                Vec3::new(-hx, hy, hz),
                Vec3::new(-hx, hy, -hz),
                Vec3::new(-hx, -hy, -hz),
            ],
        ),
    ];

    let uvs = [
        Vec2::new(0.0, 1.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
    ];

    for (normal, corners) in sides {
        let base = vertices.len();
        for (corner, uv) in corners.into_iter().zip(uvs) {
            vertices.push(Vertex::new(corner, normal, uv));
        }
        // Two triangles per side
        faces.push(Face::new(base, base + 1, base + 2));
        faces.push(Face::new(base, base + 2, base + 3));
    }

    Mesh::new(name, vertices, faces)
}
