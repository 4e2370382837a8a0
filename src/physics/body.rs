//! Per-mesh rigid body: gravity accumulation and position integration

use serde::{Deserialize, Serialize};

use crate::rasterizer::Vec3;

/// Default gravitational acceleration (Y axis)
pub const GRAVITY: f32 = -9.81;

/// Default divisor turning velocity into a per-tick displacement
pub const DEFAULT_TIME_SCALE: f32 = 600.0;

/// What happens to a body's velocity at the end of each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VelocityReset {
    /// Replace each component with its signed square root
    SquareRoot,
    /// Drop the velocity entirely; only accumulated gravity carries over
    #[default]
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub time_scale: f32,
    pub velocity_reset: VelocityReset,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            velocity_reset: VelocityReset::Zero,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsItem {
    pub velocity: Vec3,
    gravity_velocity: Vec3,
    pub use_gravity: bool,
    pub mass: f32,
    pub gravity_force: f32,
    /// Zero marks the mesh as an anchor that collision resolution never moves
    pub collider_fix_value: f32,
}

impl PhysicsItem {
    pub fn new(use_gravity: bool, mass: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            gravity_velocity: Vec3::ZERO,
            use_gravity,
            mass,
            gravity_force: GRAVITY,
            collider_fix_value: 1.0,
        }
    }

    /// Velocity accumulated from gravity so far (never capped)
    pub fn gravity_velocity(&self) -> Vec3 {
        self.gravity_velocity
    }

    pub fn apply_forces(&mut self) {
        if self.use_gravity {
            self.gravity_velocity += Vec3::new(0.0, self.mass * self.gravity_force, 0.0);
        } else {
            self.gravity_velocity = Vec3::ZERO;
        }
    }

    pub fn update_transform(&mut self, position: &mut Vec3, time_scale: f32) {
        self.velocity += self.gravity_velocity;
        *position += self.velocity / time_scale;
    }

    pub fn update_velocity(&mut self, reset: VelocityReset) {
        self.velocity = match reset {
            VelocityReset::SquareRoot => {
                let v = self.velocity;
                Vec3::new(signed_sqrt(v.x), signed_sqrt(v.y), signed_sqrt(v.z))
            }
            VelocityReset::Zero => Vec3::ZERO,
        };
    }
}

impl Default for PhysicsItem {
    fn default() -> Self {
        Self::new(false, 1.0)
    }
}

fn signed_sqrt(v: f32) -> f32 {
    v.signum() * v.abs().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(item: &mut PhysicsItem, position: &mut Vec3, config: &PhysicsConfig) {
        item.apply_forces();
        item.update_transform(position, config.time_scale);
        item.update_velocity(config.velocity_reset);
    }

    #[test]
    fn test_first_tick_displacement() {
        let config = PhysicsConfig::default();
        let mut item = PhysicsItem::new(true, 1.0);
        let mut position = Vec3::ZERO;

        tick(&mut item, &mut position, &config);
        assert!((position.y - (-9.81 / 600.0)).abs() < 1e-6);
        assert!((position.y + 0.01635).abs() < 1e-4);
        assert_eq!(position.x, 0.0);
    }

    #[test]
    fn test_gravity_accumulates_unbounded() {
        let config = PhysicsConfig::default();
        let mut item = PhysicsItem::new(true, 1.0);
        let mut position = Vec3::ZERO;

        let mut last_step = 0.0f32;
        for _ in 0..600 {
            let before = position.y;
            tick(&mut item, &mut position, &config);
            let step = before - position.y;
            assert!(step > last_step);
            last_step = step;
        }
        assert!((item.gravity_velocity().y - 600.0 * -9.81).abs() < 0.5);
        // Sum of k * 9.81 / 600 for k in 1..=600
        let expected = -9.81 * (600.0 * 601.0 / 2.0) / 600.0;
        assert!((position.y - expected).abs() < 0.5);
    }

    #[test]
    fn test_disabled_gravity_zeroes_accumulator() {
        let mut item = PhysicsItem::new(true, 2.0);
        item.apply_forces();
        assert_eq!(item.gravity_velocity(), Vec3::new(0.0, -19.62, 0.0));

        item.use_gravity = false;
        item.apply_forces();
        assert_eq!(item.gravity_velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_velocity_reset_modes() {
        let mut item = PhysicsItem::default();
        item.velocity = Vec3::new(4.0, -9.0, 0.0);
        item.update_velocity(VelocityReset::SquareRoot);
        assert_eq!(item.velocity, Vec3::new(2.0, -3.0, 0.0));

        item.update_velocity(VelocityReset::Zero);
        assert_eq!(item.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_custom_time_scale() {
        let config = PhysicsConfig { time_scale: 60.0, ..Default::default() };
        let mut item = PhysicsItem::default();
        item.velocity = Vec3::new(6.0, 0.0, 0.0);
        let mut position = Vec3::ZERO;
        tick(&mut item, &mut position, &config);
        assert!((position.x - 0.1).abs() < 1e-6);
    }
}
