//! Error type for everything that touches the filesystem
//!
//! Geometry, physics and rasterization are infallible; only config, scene
//! and texture loading can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid mesh '{mesh}': {reason}")]
    InvalidMesh { mesh: String, reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
