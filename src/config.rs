//! Engine configuration, read from a RON file
//!
//! Every field is optional; missing ones take the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::physics::PhysicsConfig;
use crate::rasterizer::{Camera, Vec3, HEIGHT, WIDTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Output resolution in pixels
    pub width: usize,
    pub height: usize,
    /// Background color (r, g, b, a)
    pub clear_color: [u8; 4],
    pub camera: CameraConfig,
    pub physics: PhysicsConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            clear_color: [60, 60, 60, 255],
            camera: CameraConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            position: camera.position.to_array(),
            target: camera.target.to_array(),
            fov: camera.fov,
            znear: camera.znear,
            zfar: camera.zfar,
        }
    }
}

impl CameraConfig {
    pub fn to_camera(&self) -> Camera {
        Camera {
            position: Vec3::from_array(self.position),
            target: Vec3::from_array(self.target),
            fov: self.fov,
            znear: self.znear,
            zfar: self.zfar,
        }
    }
}

impl EngineConfig {
    fn validate(self) -> Result<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "resolution {}x{} has no pixels",
                self.width, self.height
            )));
        }
        if self.physics.time_scale.is_nan() || self.physics.time_scale <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "time_scale must be positive, got {}",
                self.physics.time_scale
            )));
        }
        Ok(self)
    }
}

/// Load the engine configuration from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

pub fn load_config_from_str(s: &str) -> Result<EngineConfig> {
    let config: EngineConfig = ron::from_str(s)?;
    config.validate()
}
