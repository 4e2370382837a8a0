//! Scene context: the mesh registry and the light list
//!
//! Meshes live in an arena and are addressed by [`MeshId`]; they are never
//! removed, so handles stay valid for the scene's lifetime. Mutate the scene
//! only between frames.

use super::mesh::{Mesh, MeshId};
use crate::physics::{Ray, RayHit};
use crate::rasterizer::Light;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh; its collider is sized from the current vertices
    pub fn add_mesh(&mut self, mut mesh: Mesh) -> MeshId {
        mesh.collider.update_size(&mesh.vertices);
        let id = MeshId(self.meshes.len());
        self.meshes.push(mesh);
        id
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn mesh(&self, id: MeshId) -> &Mesh {
        &self.meshes[id.0]
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> &mut Mesh {
        &mut self.meshes[id.0]
    }

    /// First mesh registered under `name`
    pub fn find(&self, name: &str) -> Option<MeshId> {
        self.meshes.iter().position(|m| m.name == name).map(MeshId)
    }

    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        ray.cast(&self.meshes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Vec3, Vertex};
    use crate::world::create_box;

    #[test]
    fn test_handles_are_registry_indices() {
        let mut scene = Scene::new();
        let a = scene.add_mesh(create_box("a", 1.0, 1.0, 1.0));
        let b = scene.add_mesh(create_box("b", 1.0, 1.0, 1.0));
        assert_eq!((a, b), (MeshId(0), MeshId(1)));
        assert_eq!(scene.find("b"), Some(b));
        assert_eq!(scene.find("missing"), None);
        assert_eq!(scene.mesh(a).name, "a");
    }

    #[test]
    fn test_add_mesh_sizes_collider() {
        let mut scene = Scene::new();
        let mut mesh = Mesh::new("tri", Vec::new(), Vec::new());
        mesh.vertices = vec![
            Vertex::from_pos(-2.0, 0.0, 1.0),
            Vertex::from_pos(3.0, 1.0, -1.0),
        ];
        let id = scene.add_mesh(mesh);
        let bounds = scene.mesh(id).collider.bounds;
        assert_eq!(bounds.min, Vec3::new(-2.0, 0.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn test_raycast_through_scene() {
        let mut scene = Scene::new();
        let id = scene.add_mesh(create_box("floor", 1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), 10.0, 5, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(scene.raycast(&ray).map(|hit| hit.mesh), Some(id));
    }
}
