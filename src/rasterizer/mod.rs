//! CPU scanline rasterizer
//!
//! Features:
//! - Scanline triangle fill with per-vertex diffuse (Gouraud) lighting
//! - Nearest in-range point light per triangle
//! - Nearest-texel texture mapping
//! - Per-pixel locked Z-buffer, faces rasterized in parallel

mod camera;
mod framebuffer;
mod math;
mod project;
mod render;
mod types;

pub use camera::*;
pub use framebuffer::*;
pub use math::*;
pub use project::*;
pub use render::*;
pub use types::*;

/// Default output resolution
pub const WIDTH: usize = 640;
pub const HEIGHT: usize = 480;
