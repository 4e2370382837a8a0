//! Framebuffer for software rendering
//!
//! Every pixel is its own lock cell holding depth and BGRA bytes, so the
//! depth test and the write happen as one step even when several rasterizer
//! workers draw into the same buffer.

use parking_lot::Mutex;

use super::math::{Vec2, Vec3};
use super::types::Color;

#[derive(Debug, Clone, Copy)]
struct Texel {
    depth: f32,
    bgra: [u8; 4],
}

impl Texel {
    const CLEARED: Texel = Texel { depth: f32::MAX, bgra: [0, 0, 0, 0] };
}

pub struct FrameBuffer {
    texels: Vec<Mutex<Texel>>,
    pub width: usize,
    pub height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            texels: (0..width * height).map(|_| Mutex::new(Texel::CLEARED)).collect(),
            width,
            height,
        }
    }

    /// Reset every pixel to the given color and every depth cell to "infinitely far"
    pub fn clear(&mut self, r: u8, g: u8, b: u8, a: u8) {
        for texel in &mut self.texels {
            *texel.get_mut() = Texel { depth: f32::MAX, bgra: [b, g, r, a] };
        }
    }

    /// Depth-tested write. Bounds are the caller's responsibility.
    /// Rejected when the stored depth is smaller than `z`; ties overwrite.
    pub fn put_pixel(&self, x: usize, y: usize, z: f32, color: Color) -> bool {
        let mut texel = self.texels[x + y * self.width].lock();
        if texel.depth < z {
            return false;
        }
        texel.depth = z;
        texel.bgra = color.to_bgra();
        true
    }

    /// Unconditional write for 2D overlays; depth is left untouched
    pub fn put_pixel_2d(&self, x: usize, y: usize, color: Color) {
        self.texels[x + y * self.width].lock().bgra = color.to_bgra();
    }

    /// Clip to the surface, then do the depth-tested write
    pub fn draw_point(&self, point: Vec3, color: Color) {
        if point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f32
            && point.y < self.height as f32
        {
            self.put_pixel(point.x as usize, point.y as usize, point.z, color);
        }
    }

    pub fn draw_point_2d(&self, point: Vec2, color: Color) {
        if point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f32
            && point.y < self.height as f32
        {
            self.put_pixel_2d(point.x as usize, point.y as usize, color);
        }
    }

    /// Draw a line from `p0` to `p1` using Bresenham's algorithm (no depth test)
    pub fn draw_line(&self, p0: Vec2, p1: Vec2, color: Color) {
        let (mut x0, mut y0) = (p0.x as i32, p0.y as i32);
        let (x1, y1) = (p1.x as i32, p1.y as i32);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.draw_point_2d(Vec2::new(x0 as f32, y0 as f32), color);

            if x0 == x1 && y0 == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Stored depth at (x, y)
    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.texels[x + y * self.width].lock().depth
    }

    /// Stored BGRA bytes at (x, y)
    pub fn color_at(&self, x: usize, y: usize) -> [u8; 4] {
        self.texels[x + y * self.width].lock().bgra
    }

    /// Copy of the color plane, 4 bytes per pixel in B, G, R, A order
    pub fn pixels(&self) -> Vec<u8> {
        self.texels.iter().flat_map(|t| t.lock().bgra).collect()
    }

    /// Copy of the color plane in R, G, B, A order (for RGBA surfaces)
    pub fn to_rgba(&self) -> Vec<u8> {
        self.texels
            .iter()
            .flat_map(|t| {
                let [b, g, r, a] = t.lock().bgra;
                [r, g, b, a]
            })
            .collect()
    }
}
