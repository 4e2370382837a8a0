//! World module - meshes, the scene registry and scene files
//!
//! Pure data structures with minimal behavior.
//! Rendering and collision logic live in the rasterizer and physics modules.

mod loader;
mod mesh;
mod primitives;
mod scene;

pub use loader::*;
pub use mesh::*;
pub use primitives::*;
pub use scene::*;
