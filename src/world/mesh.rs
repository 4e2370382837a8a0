//! Meshes: geometry plus the physics body and collider that move it

use std::sync::Arc;

use crate::physics::{Collider, PhysicsItem};
use crate::rasterizer::{Face, Texture, Vec3, Vertex};

/// Stable handle to a mesh registered in a [`Scene`](super::Scene)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub usize);

#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    /// Every index is below `vertices.len()`
    pub faces: Vec<Face>,
    pub position: Vec3,
    /// Euler angles: pitch in x, yaw in y, roll in z
    pub rotation: Vec3,
    pub physics: PhysicsItem,
    pub collider: Collider,
    pub texture: Option<Arc<Texture>>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        let collider = Collider::from_vertices(&vertices);
        Self {
            name: name.into(),
            vertices,
            faces,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            physics: PhysicsItem::default(),
            collider,
            texture: None,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_physics(mut self, physics: PhysicsItem) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }
}
