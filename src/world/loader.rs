//! Scene loading
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files. Mesh
//! data is validated here so the renderer and physics can trust face indices.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::mesh::Mesh;
use super::scene::Scene;
use crate::error::{EngineError, Result};
use crate::physics::PhysicsItem;
use crate::rasterizer::{Color, Face, Light, Texture, Vec2, Vec3, Vertex};

/// Top-level scene document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub lights: Vec<LightDesc>,
    #[serde(default)]
    pub meshes: Vec<MeshDesc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightDesc {
    pub position: [f32; 3],
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    pub range: f32,
    /// Per-channel multipliers (r, g, b, a)
    #[serde(default = "default_light_color")]
    pub color: [f32; 4],
}

fn default_intensity() -> f32 {
    50.0
}

fn default_light_color() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDesc {
    pub name: String,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Texture coordinate sets per vertex (0, 1 or 2); decides the vertex stride
    #[serde(default)]
    pub uv_count: u32,
    /// Flat vertex data: position, normal, then `uv_count` UV pairs
    pub vertices: Vec<f32>,
    /// Flat triangle list
    pub indices: Vec<usize>,
    /// Texture image path, relative to the scene file
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub use_gravity: bool,
    #[serde(default = "default_mass")]
    pub mass: f32,
    #[serde(default = "default_fix_value")]
    pub collider_fix_value: f32,
}

fn default_mass() -> f32 {
    1.0
}

fn default_fix_value() -> f32 {
    1.0
}

impl From<&LightDesc> for Light {
    fn from(desc: &LightDesc) -> Self {
        let [r, g, b, a] = desc.color;
        Light::new(Vec3::from_array(desc.position), desc.intensity, desc.range)
            .with_color(Color::new(r, g, b, a))
    }
}

fn invalid(mesh: &str, reason: String) -> EngineError {
    EngineError::InvalidMesh { mesh: mesh.to_string(), reason }
}

/// Floats per vertex for a given number of UV sets
fn vertex_stride(desc: &MeshDesc) -> Result<usize> {
    match desc.uv_count {
        0 => Ok(6),
        1 => Ok(8),
        2 => Ok(10),
        n => Err(invalid(&desc.name, format!("unsupported uv_count {}", n))),
    }
}

/// Build a mesh from its description, checking every structural invariant
pub fn build_mesh(desc: &MeshDesc) -> Result<Mesh> {
    let stride = vertex_stride(desc)?;

    if desc.vertices.len() % stride != 0 {
        return Err(invalid(
            &desc.name,
            format!("{} vertex floats is not a multiple of stride {}", desc.vertices.len(), stride),
        ));
    }
    if desc.indices.len() % 3 != 0 {
        return Err(invalid(
            &desc.name,
            format!("{} indices do not form whole triangles", desc.indices.len()),
        ));
    }

    let vertices: Vec<Vertex> = desc
        .vertices
        .chunks_exact(stride)
        .map(|v| {
            let uv = if desc.uv_count > 0 { Vec2::new(v[6], v[7]) } else { Vec2::ZERO };
            Vertex::new(Vec3::new(v[0], v[1], v[2]), Vec3::new(v[3], v[4], v[5]), uv)
        })
        .collect();

    if let Some(&bad) = desc.indices.iter().find(|&&i| i >= vertices.len()) {
        return Err(invalid(
            &desc.name,
            format!("index {} out of range for {} vertices", bad, vertices.len()),
        ));
    }

    let faces = desc
        .indices
        .chunks_exact(3)
        .map(|f| Face::new(f[0], f[1], f[2]))
        .collect();

    let mut physics = PhysicsItem::new(desc.use_gravity, desc.mass);
    physics.collider_fix_value = desc.collider_fix_value;

    Ok(Mesh::new(desc.name.clone(), vertices, faces)
        .with_position(Vec3::from_array(desc.position))
        .with_rotation(Vec3::from_array(desc.rotation))
        .with_physics(physics))
}

/// Turn a parsed scene document into a scene. Texture paths resolve
/// against `base_dir`; meshes sharing a texture share one decoded copy.
pub fn build_scene(file: &SceneFile, base_dir: &Path) -> Result<Scene> {
    let mut scene = Scene::new();
    let mut textures: HashMap<PathBuf, Arc<Texture>> = HashMap::new();

    for light in &file.lights {
        scene.add_light(light.into());
    }

    for desc in &file.meshes {
        let mut mesh = build_mesh(desc)?;

        if let Some(name) = &desc.texture {
            let path = base_dir.join(name);
            let texture = match textures.get(&path) {
                Some(tex) => tex.clone(),
                None => {
                    let tex = Arc::new(Texture::from_file(&path)?);
                    textures.insert(path, tex.clone());
                    tex
                }
            };
            mesh = mesh.with_texture(texture);
        }

        scene.add_mesh(mesh);
    }

    log::info!(
        "Loaded scene: {} meshes, {} lights",
        scene.meshes.len(),
        scene.lights.len()
    );
    Ok(scene)
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let file: SceneFile = ron::from_str(&contents)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    build_scene(&file, base_dir)
}

/// Load a scene from a RON string (textures resolve against the working directory)
pub fn load_scene_from_str(s: &str) -> Result<Scene> {
    let file: SceneFile = ron::from_str(s)?;
    build_scene(&file, Path::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_SCENE: &str = r#"
SceneFile(
    lights: [
        LightDesc(position: (0.0, 0.0, 50.0), intensity: 1.0, range: 5000.0, color: (1.0, 0.5, 1.0, 1.0)),
    ],
    meshes: [
        MeshDesc(
            name: "tri",
            position: (7.0, 0.0, 0.0),
            vertices: [
                0.0, 0.0, 0.0,  0.0, 0.0, -1.0,
                1.0, 0.0, 0.0,  0.0, 0.0, -1.0,
                0.0, 1.0, 0.0,  0.0, 0.0, -1.0,
            ],
            indices: [0, 1, 2],
            use_gravity: true,
            collider_fix_value: 0.0,
        ),
    ],
)
"#;

    fn desc(uv_count: u32, vertices: Vec<f32>, indices: Vec<usize>) -> MeshDesc {
        MeshDesc {
            name: "m".to_string(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            uv_count,
            vertices,
            indices,
            texture: None,
            use_gravity: false,
            mass: 1.0,
            collider_fix_value: 1.0,
        }
    }

    #[test]
    fn test_load_scene_from_str() {
        let scene = load_scene_from_str(TRIANGLE_SCENE).unwrap();
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.lights[0].color, Color::new(1.0, 0.5, 1.0, 1.0));
        assert_eq!(scene.lights[0].range, 5000.0);

        let mesh = &scene.meshes[0];
        assert_eq!(mesh.name, "tri");
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.faces, vec![Face::new(0, 1, 2)]);
        assert_eq!(mesh.position, Vec3::new(7.0, 0.0, 0.0));
        assert!(mesh.physics.use_gravity);
        assert_eq!(mesh.physics.collider_fix_value, 0.0);
        assert_eq!(mesh.collider.bounds.max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_stride_follows_uv_count() {
        let data = vec![
            1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.25, 0.75,
            4.0, 5.0, 6.0, 0.0, 1.0, 0.0, 0.5, 0.5,
        ];
        let mesh = build_mesh(&desc(1, data, vec![])).unwrap();
        assert_eq!(mesh.vertices.len(), 2);
        assert_eq!(mesh.vertices[1].coordinates, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(mesh.vertices[0].texture_coordinates, Vec2::new(0.25, 0.75));

        let two_sets = vec![0.0; 20];
        assert_eq!(build_mesh(&desc(2, two_sets, vec![])).unwrap().vertices.len(), 2);
    }

    #[test]
    fn test_rejects_malformed_meshes() {
        let six = vec![0.0; 18];
        let cases = [
            desc(3, six.clone(), vec![0, 1, 2]),
            desc(0, vec![0.0; 7], vec![]),
            desc(0, six.clone(), vec![0, 1]),
            desc(0, six.clone(), vec![0, 1, 3]),
        ];
        for case in cases {
            match build_mesh(&case) {
                Err(EngineError::InvalidMesh { mesh, .. }) => assert_eq!(mesh, "m"),
                other => panic!("expected InvalidMesh, got {:?}", other.map(|m| m.name)),
            }
        }
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert!(matches!(load_scene_from_str("SceneFile(meshes: [oops"), Err(EngineError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(load_scene("does/not/exist.ron"), Err(EngineError::Io(_))));
    }
}
