//! Rigid-body physics over axis-aligned box colliders
//!
//! Positional collision resolution only: overlapping meshes are moved apart,
//! velocities are never touched by a contact. Pairwise checks are exhaustive.

mod body;
mod collider;
mod ray;

pub use body::*;
pub use collider::*;
pub use ray::*;

use crate::world::{Mesh, Scene};

/// Advance one mesh by a tick: gravity, velocity, position, collider refresh,
/// then collision checks against every mesh registered before it.
pub fn update_physics(meshes: &mut [Mesh], index: usize, config: &PhysicsConfig) {
    let Some(mesh) = meshes.get_mut(index) else {
        return;
    };

    mesh.physics.apply_forces();
    mesh.physics.update_transform(&mut mesh.position, config.time_scale);
    mesh.physics.update_velocity(config.velocity_reset);
    mesh.collider.update_size(&mesh.vertices);

    check_collisions(meshes, index);
}

/// Run one physics tick over the whole scene, in registry order
pub fn step(scene: &mut Scene, config: &PhysicsConfig) {
    for mesh in &mut scene.meshes {
        mesh.collider.colliding = false;
    }

    for index in 0..scene.meshes.len() {
        update_physics(&mut scene.meshes, index, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec3;
    use crate::world::create_box;

    #[test]
    fn test_step_drops_box_onto_anchor() {
        let mut scene = Scene::new();
        let falling = scene.add_mesh(
            create_box("crate", 0.5, 0.5, 0.5)
                .with_position(Vec3::new(0.25, 3.0, 0.0))
                .with_physics(PhysicsItem::new(true, 1.0)),
        );
        let mut floor = create_box("floor", 10.0, 0.5, 10.0).with_position(Vec3::new(0.0, -2.0, 0.0));
        floor.physics.collider_fix_value = 0.0;
        let floor = scene.add_mesh(floor);

        let config = PhysicsConfig::default();
        let mut landed = false;
        for _ in 0..2000 {
            step(&mut scene, &config);
            if scene.mesh(falling).collider.colliding {
                landed = true;
                break;
            }
        }
        assert!(landed);

        // Resting on top of the floor, floor untouched
        let crate_y = scene.mesh(falling).position.y;
        assert!((crate_y - (-1.5 + 0.5)).abs() < 1e-4);
        assert_eq!(scene.mesh(floor).position, Vec3::new(0.0, -2.0, 0.0));
        assert!(scene.mesh(floor).collider.colliding);
    }

    #[test]
    fn test_step_first_tick_matches_integration() {
        let mut scene = Scene::new();
        let id = scene.add_mesh(create_box("b", 1.0, 1.0, 1.0).with_physics(PhysicsItem::new(true, 1.0)));
        step(&mut scene, &PhysicsConfig::default());
        assert!((scene.mesh(id).position.y + 9.81 / 600.0).abs() < 1e-6);
        assert!(!scene.mesh(id).collider.colliding);
    }

    #[test]
    fn test_step_clears_stale_collision_flags() {
        let mut scene = Scene::new();
        let a = scene.add_mesh(create_box("a", 1.0, 1.0, 1.0));
        let b = scene.add_mesh(create_box("b", 1.0, 1.0, 1.0).with_position(Vec3::new(50.0, 0.0, 0.0)));
        scene.mesh_mut(a).collider.colliding = true;
        scene.mesh_mut(b).collider.colliding = true;

        step(&mut scene, &PhysicsConfig::default());
        assert!(!scene.mesh(a).collider.colliding);
        assert!(!scene.mesh(b).collider.colliding);
    }
}
