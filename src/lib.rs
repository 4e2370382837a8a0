//! Softbox: CPU scanline rasterizer with AABB rigid-body collision
//!
//! - Scanline triangle fill with per-vertex diffuse lighting
//! - Per-pixel locked depth buffer, faces rasterized in parallel
//! - Gravity integration with positional box/box collision resolution
//! - Sampled ray queries against mesh colliders
//!
//! A frame is: [`physics::step`], any ray queries, then [`rasterizer::render`].

pub mod config;
pub mod error;
pub mod physics;
pub mod rasterizer;
pub mod world;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
