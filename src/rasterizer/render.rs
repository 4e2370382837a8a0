//! Core rendering functions
//! Scanline triangle rasterization with per-vertex diffuse lighting

use rayon::prelude::*;

use super::camera::Camera;
use super::framebuffer::FrameBuffer;
use super::math::{interpolate, line_side_2d, safe_normalize, world_matrix, Mat4, Vec3};
use super::project::project;
use super::types::{Color, Light, Texture, Vertex};
use crate::world::{Mesh, Scene};

/// A projected vertex paired with its diffuse term
#[derive(Clone, Copy)]
struct Shaded<'a> {
    vertex: &'a Vertex,
    ndotl: f32,
}

/// Cosine between the surface normal and the direction towards the light,
/// clamped to [0, 1]. Zero-length vectors yield 0.
pub fn compute_ndotl(world_pos: Vec3, normal: Vec3, light_pos: Vec3) -> f32 {
    let light_direction = safe_normalize(light_pos - world_pos);
    safe_normalize(normal).dot(light_direction).max(0.0)
}

/// Pick the nearest light whose range reaches `center`.
/// Returns the light and its distance; falls back to an unlit stand-in at
/// distance `f32::MAX`. The first of several equally near lights wins.
pub fn select_light(lights: &[Light], center: Vec3) -> (Light, f32) {
    let mut light = Light::unlit();
    let mut distance = f32::MAX;

    for l in lights {
        let d = l.position.distance(center);
        if distance > d && d < l.range {
            distance = d;
            light = *l;
        }
    }

    (light, distance)
}

/// Draw one row of a triangle, left edge `pa -> pb`, right edge `pc -> pd`
fn process_scan_line(
    fb: &FrameBuffer,
    y: i32,
    pa: Shaded,
    pb: Shaded,
    pc: Shaded,
    pd: Shaded,
    color: Color,
    texture: Option<&Texture>,
) {
    let (a, b, c, d) = (pa.vertex, pb.vertex, pc.vertex, pd.vertex);
    let current_y = y as f32;

    // Horizontal edges force the gradient to 1
    let gradient1 = if a.coordinates.y != b.coordinates.y {
        (current_y - a.coordinates.y) / (b.coordinates.y - a.coordinates.y)
    } else {
        1.0
    };
    let gradient2 = if c.coordinates.y != d.coordinates.y {
        (current_y - c.coordinates.y) / (d.coordinates.y - c.coordinates.y)
    } else {
        1.0
    };

    // Kept in f32: unclipped geometry can put the span ends far off screen
    let sx = interpolate(a.coordinates.x, b.coordinates.x, gradient1).trunc();
    let ex = interpolate(c.coordinates.x, d.coordinates.x, gradient2).trunc();
    if !sx.is_finite() || !ex.is_finite() {
        return;
    }

    let z1 = interpolate(a.coordinates.z, b.coordinates.z, gradient1);
    let z2 = interpolate(c.coordinates.z, d.coordinates.z, gradient2);

    let snl = interpolate(pa.ndotl, pb.ndotl, gradient1);
    let enl = interpolate(pc.ndotl, pd.ndotl, gradient2);

    let su = interpolate(a.texture_coordinates.x, b.texture_coordinates.x, gradient1);
    let eu = interpolate(c.texture_coordinates.x, d.texture_coordinates.x, gradient2);
    let sv = interpolate(a.texture_coordinates.y, b.texture_coordinates.y, gradient1);
    let ev = interpolate(c.texture_coordinates.y, d.texture_coordinates.y, gradient2);

    // Pixels outside the surface are discarded by draw_point anyway
    let first = sx.max(0.0) as i32;
    let last = ex.min(fb.width as f32) as i32;

    for x in first..last {
        let gradient = (x as f32 - sx) / (ex - sx);

        let z = interpolate(z1, z2, gradient);
        let ndotl = interpolate(snl, enl, gradient);
        let u = interpolate(su, eu, gradient);
        let v = interpolate(sv, ev, gradient);

        let texture_color = match texture {
            Some(tex) => tex.sample(u, v),
            None => Color::WHITE,
        };

        fb.draw_point(Vec3::new(x as f32, current_y, z), color * ndotl * texture_color);
    }
}

/// Rasterize a triangle of already-projected vertices
pub fn draw_triangle(
    fb: &FrameBuffer,
    mut v1: Vertex,
    mut v2: Vertex,
    mut v3: Vertex,
    color: Color,
    texture: Option<&Texture>,
    lights: &[Light],
) {
    // Sort so that v1 is topmost and v3 bottommost on screen
    if v1.coordinates.y > v2.coordinates.y {
        std::mem::swap(&mut v1, &mut v2);
    }
    if v2.coordinates.y > v3.coordinates.y {
        std::mem::swap(&mut v2, &mut v3);
    }
    if v1.coordinates.y > v2.coordinates.y {
        std::mem::swap(&mut v1, &mut v2);
    }

    let p1 = v1.coordinates;
    let p2 = v2.coordinates;
    let p3 = v3.coordinates;

    let center = (v1.world_coordinates + v2.world_coordinates + v3.world_coordinates) / 3.0;
    let (light, distance) = select_light(lights, center);

    let s1 = Shaded { vertex: &v1, ndotl: compute_ndotl(v1.world_coordinates, v1.normal, light.position) };
    let s2 = Shaded { vertex: &v2, ndotl: compute_ndotl(v2.world_coordinates, v2.normal, light.position) };
    let s3 = Shaded { vertex: &v3, ndotl: compute_ndotl(v3.world_coordinates, v3.normal, light.position) };

    let lit = color * light.color * (light.intensity / (distance / 2.0)).max(1.0);

    let y_start = (p1.y as i32).max(0);
    let y_end = (p3.y as i32).min(fb.height as i32 - 1);

    // P2 right of the long edge P1-P3: the long edge bounds the span on the left.
    // Collinear triangles fall through to the other branch.
    if line_side_2d(p2, p1, p3) > 0.0 {
        for y in y_start..=y_end {
            if (y as f32) < p2.y {
                process_scan_line(fb, y, s1, s3, s1, s2, lit, texture);
            } else {
                process_scan_line(fb, y, s1, s3, s2, s3, lit, texture);
            }
        }
    } else {
        for y in y_start..=y_end {
            if (y as f32) < p2.y {
                process_scan_line(fb, y, s1, s2, s1, s3, lit, texture);
            } else {
                process_scan_line(fb, y, s2, s3, s1, s3, lit, texture);
            }
        }
    }
}

/// Render one mesh, rasterizing its faces in parallel
pub fn render_mesh(fb: &FrameBuffer, mesh: &Mesh, transform: &Mat4, world: &Mat4, lights: &[Light]) {
    let texture = mesh.texture.as_deref();

    mesh.faces.par_iter().for_each(|face| {
        let a = project(&mesh.vertices[face.a], transform, world, fb.width, fb.height);
        let b = project(&mesh.vertices[face.b], transform, world, fb.width, fb.height);
        let c = project(&mesh.vertices[face.c], transform, world, fb.width, fb.height);

        draw_triangle(fb, a, b, c, Color::WHITE, texture, lights);
    });
}

/// Render every mesh of the scene from the camera's point of view.
/// Meshes are drawn one after another; faces within a mesh in parallel.
pub fn render(fb: &FrameBuffer, camera: &Camera, scene: &Scene) {
    let view = camera.view_matrix();
    let projection = camera.projection_matrix(fb.width, fb.height);

    for mesh in &scene.meshes {
        // Rotation before translation
        let world = world_matrix(mesh.position, mesh.rotation);
        let transform = projection * view * world;

        render_mesh(fb, mesh, &transform, &world, &scene.lights);
    }

    log::trace!(
        "rendered {} meshes, {} faces",
        scene.meshes.len(),
        scene.meshes.iter().map(|m| m.faces.len()).sum::<usize>()
    );
}
