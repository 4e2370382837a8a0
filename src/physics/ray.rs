//! Sampled ray queries against mesh colliders

use crate::rasterizer::Vec3;
use crate::world::{Mesh, MeshId};

/// A ray that is tested by sampling points along it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub length: f32,
    /// Sample points per unit of length
    pub checks_per_unit: u32,
    pub direction: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the origin of the first sample inside a collider
    pub distance: f32,
    pub mesh: MeshId,
}

impl Ray {
    pub fn new(origin: Vec3, length: f32, checks_per_unit: u32, direction: Vec3) -> Self {
        Self {
            origin,
            length,
            checks_per_unit,
            direction,
        }
    }

    /// Point at `distance` along the ray
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction.normalize_or_zero() * distance
    }

    /// Number of sample points `cast` visits, saturating at `u32::MAX`
    pub fn sample_count(&self) -> u32 {
        (self.length * self.checks_per_unit as f32).ceil().clamp(0.0, u32::MAX as f32) as u32
    }

    /// Walk the ray sample by sample and report the first collider a sample
    /// lands strictly inside. With coarse sampling this is the first hit along
    /// the sampled path, not necessarily the nearest mesh.
    pub fn cast(&self, meshes: &[Mesh]) -> Option<RayHit> {
        if self.checks_per_unit == 0 {
            log::warn!("ray cast with zero checks per unit never samples");
            return None;
        }
        if !self.length.is_finite() {
            log::warn!("ray cast with non-finite length {}", self.length);
            return None;
        }

        let checks = self.checks_per_unit as f32;
        let direction = self.direction.normalize_or_zero();

        for i in 0..self.sample_count() {
            let distance = i as f32 / checks;
            if distance >= self.length {
                break;
            }
            let point = self.origin + direction * distance;

            for (index, mesh) in meshes.iter().enumerate() {
                if mesh.collider.world_bounds(mesh.position).contains_point(point) {
                    return Some(RayHit {
                        distance,
                        mesh: MeshId(index),
                    });
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::create_box;

    fn down_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 5.0, 0.0), 10.0, 5, Vec3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_ray_hits_box_below() {
        let meshes = vec![create_box("floor", 1.0, 1.0, 1.0)];
        let hit = down_ray().cast(&meshes).expect("ray should hit the box");
        assert_eq!(hit.mesh, MeshId(0));
        assert!((hit.distance - 4.0).abs() <= 0.2 + 1e-4);
        // The boundary sample at exactly 4 is on the face and does not count
        assert!(hit.distance > 4.0);
    }

    #[test]
    fn test_ray_misses_when_box_moved_away() {
        let meshes = vec![create_box("floor", 1.0, 1.0, 1.0).with_position(Vec3::new(5.0, 0.0, 0.0))];
        assert_eq!(down_ray().cast(&meshes), None);
    }

    #[test]
    fn test_ray_empty_registry() {
        assert_eq!(down_ray().cast(&[]), None);
    }

    #[test]
    fn test_ray_first_sampled_hit_wins() {
        let meshes = vec![
            create_box("low", 1.0, 1.0, 1.0).with_position(Vec3::new(0.0, -3.0, 0.0)),
            create_box("high", 1.0, 1.0, 1.0).with_position(Vec3::new(0.0, 1.0, 0.0)),
        ];
        let hit = down_ray().cast(&meshes).unwrap();
        assert_eq!(hit.mesh, MeshId(1));
    }

    #[test]
    fn test_ray_zero_density() {
        let mut ray = down_ray();
        ray.checks_per_unit = 0;
        assert_eq!(ray.cast(&[create_box("b", 10.0, 10.0, 10.0)]), None);
    }

    #[test]
    fn test_sample_count_saturates() {
        assert_eq!(down_ray().sample_count(), 50);

        let mut ray = down_ray();
        ray.length = 1.0e12;
        ray.checks_per_unit = 1000;
        assert_eq!(ray.sample_count(), u32::MAX);

        ray.length = -3.0;
        assert_eq!(ray.sample_count(), 0);
        assert_eq!(ray.cast(&[create_box("b", 10.0, 10.0, 10.0)]), None);
    }

    #[test]
    fn test_long_ray_still_reports_first_hit() {
        let mut ray = down_ray();
        ray.length = 1.0e12;
        ray.checks_per_unit = 1000;
        let hit = ray.cast(&[create_box("floor", 1.0, 1.0, 1.0)]).unwrap();
        assert!((hit.distance - 4.0).abs() <= 0.01);
    }

    #[test]
    fn test_ray_direction_is_normalized() {
        let mut ray = down_ray();
        ray.direction = Vec3::new(0.0, -10.0, 0.0);
        let hit = ray.cast(&[create_box("floor", 1.0, 1.0, 1.0)]).unwrap();
        assert!((hit.distance - 4.0).abs() <= 0.2 + 1e-4);
        assert_eq!(ray.at(2.0), Vec3::new(0.0, 3.0, 0.0));
    }
}
