//! Core types for the rasterizer

use std::ops::Mul;

use super::math::{clamp01, Vec2, Vec3};
use crate::error::Result;

/// RGBA color (0.0-1.0 per channel, may exceed 1.0 before conversion)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
    pub const YELLOW: Color = Color { r: 1.0, g: 1.0, b: 0.0, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Convert to the framebuffer byte layout: B, G, R, A
    pub fn to_bgra(self) -> [u8; 4] {
        [
            channel_byte(self.b),
            channel_byte(self.g),
            channel_byte(self.r),
            channel_byte(self.a),
        ]
    }
}

fn channel_byte(c: f32) -> u8 {
    (clamp01(c) * 255.0) as u8
}

impl Mul<f32> for Color {
    type Output = Color;
    fn mul(self, s: f32) -> Color {
        Color {
            r: self.r * s,
            g: self.g * s,
            b: self.b * s,
            a: self.a * s,
        }
    }
}

impl Mul for Color {
    type Output = Color;
    fn mul(self, other: Color) -> Color {
        Color {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: self.a * other.a,
        }
    }
}

/// A mesh vertex.
///
/// After projection `coordinates` holds screen X/Y and depth in Z, while
/// `world_coordinates` and `normal` are in world space for lighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub normal: Vec3,
    pub coordinates: Vec3,
    pub world_coordinates: Vec3,
    pub texture_coordinates: Vec2,
}

impl Vertex {
    pub fn new(coordinates: Vec3, normal: Vec3, texture_coordinates: Vec2) -> Self {
        Self {
            normal,
            coordinates,
            world_coordinates: Vec3::ZERO,
            texture_coordinates,
        }
    }

    pub fn from_pos(x: f32, y: f32, z: f32) -> Self {
        Self {
            coordinates: Vec3::new(x, y, z),
            ..Default::default()
        }
    }
}

/// A triangle face (indices into the mesh's vertex array)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }
}

/// Decoded texture (array of colors, row-major)
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    /// Single-color texture
    pub fn solid(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
            name: "solid".to_string(),
        }
    }

    /// Load a texture from an image file (png, jpeg, bmp)
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let texture = Self::from_image(img, name);
        log::info!("Loaded texture: {} ({}x{})", texture.name, texture.width, texture.height);
        Ok(texture)
    }

    /// Load a texture from encoded image bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(img, name))
    }

    fn from_image(img: image::DynamicImage, name: String) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| Color::from_bytes(p[0], p[1], p[2], p[3]))
            .collect();

        Self {
            width: width as usize,
            height: height as usize,
            pixels,
            name,
        }
    }

    /// Create a checkerboard test texture
    pub fn checkerboard(width: usize, height: usize, color1: Color, color2: Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / 4) + (y / 4)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self { width, height, pixels, name: "checkerboard".to_string() }
    }

    /// Sample at UV coordinates, nearest texel, wrapping in both directions
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::WHITE;
        }
        let tx = ((u * self.width as f32) as i64).rem_euclid(self.width as i64) as usize;
        let ty = ((v * self.height as f32) as i64).rem_euclid(self.height as i64) as usize;
        self.pixels[ty * self.width + tx]
    }
}

/// Point light with a limited range and per-channel multipliers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f32,
    pub range: f32,
    pub color: Color,
}

impl Light {
    pub fn new(position: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            position,
            intensity,
            range,
            color: Color::WHITE,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Stand-in used when no light reaches a triangle: contributes nothing
    pub fn unlit() -> Self {
        Self {
            position: Vec3::splat(f32::MAX),
            intensity: 0.0,
            range: 0.0,
            color: Color::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}
