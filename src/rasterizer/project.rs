//! Vertex projection from mesh-local space to the screen

use super::math::{transform_coordinate, Mat4, Vec2, Vec3};
use super::types::Vertex;

/// Map NDC X/Y in [-1, 1] onto pixels, origin top-left with Y pointing down
fn ndc_to_screen(ndc: Vec3, width: usize, height: usize) -> (f32, f32) {
    let w = width as f32;
    let h = height as f32;
    let x = ndc.x * w / 2.0 + w / 2.0;
    let y = -ndc.y * h / 2.0 + h / 2.0;
    (x, y)
}

/// Project a vertex through the combined world/view/projection matrix.
///
/// The result carries screen X/Y with depth in Z, plus world-space position
/// and normal for lighting. No near/far clipping happens here.
pub fn project(vertex: &Vertex, transform: &Mat4, world: &Mat4, width: usize, height: usize) -> Vertex {
    let ndc = transform_coordinate(vertex.coordinates, transform);
    let world_coordinates = transform_coordinate(vertex.coordinates, world);
    let normal = world.transform_vector3(vertex.normal);

    let (x, y) = ndc_to_screen(ndc, width, height);

    Vertex {
        normal,
        coordinates: Vec3::new(x, y, ndc.z),
        world_coordinates,
        texture_coordinates: vertex.texture_coordinates,
    }
}

/// Project a point to pixel coordinates only (debug overlays)
pub fn project_2d(point: Vec3, transform: &Mat4, width: usize, height: usize) -> Vec2 {
    let ndc = transform_coordinate(point, transform);
    let (x, y) = ndc_to_screen(ndc, width, height);
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_projection_maps_ndc_corners() {
        let v = Vertex::from_pos(0.0, 0.0, 0.5);
        let p = project(&v, &Mat4::IDENTITY, &Mat4::IDENTITY, 640, 480);
        assert!((p.coordinates.x - 320.0).abs() < 0.001);
        assert!((p.coordinates.y - 240.0).abs() < 0.001);
        assert!((p.coordinates.z - 0.5).abs() < 0.001);

        let top_right = project(&Vertex::from_pos(1.0, 1.0, 0.0), &Mat4::IDENTITY, &Mat4::IDENTITY, 640, 480);
        assert!((top_right.coordinates.x - 640.0).abs() < 0.001);
        assert!(top_right.coordinates.y.abs() < 0.001);

        let bottom_left = project_2d(Vec3::new(-1.0, -1.0, 0.0), &Mat4::IDENTITY, 640, 480);
        assert!(bottom_left.x.abs() < 0.001);
        assert!((bottom_left.y - 480.0).abs() < 0.001);
    }

    #[test]
    fn test_world_space_is_kept_separate() {
        let mut v = Vertex::from_pos(1.0, 0.0, 0.0);
        v.normal = Vec3::X;
        v.texture_coordinates = Vec2::new(0.25, 0.75);
        let world = Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0));
        let p = project(&v, &Mat4::IDENTITY, &world, 100, 100);

        assert_eq!(p.world_coordinates, Vec3::new(1.0, 5.0, 0.0));
        // Directions ignore translation
        assert_eq!(p.normal, Vec3::X);
        assert_eq!(p.texture_coordinates, Vec2::new(0.25, 0.75));
    }
}
