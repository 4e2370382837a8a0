//! Axis-aligned box colliders and positional collision resolution
//!
//! Boxes are stored in mesh-local space. World-space boxes are built on
//! demand from the mesh position and never written back.

use crate::rasterizer::{Vec3, Vertex};
use crate::world::Mesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component of `v` along this axis
    pub fn of(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Component-wise extrema of a point set; `None` when empty
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| Self::new(b.min.min(p), b.max.max(p))))
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Overlap on all three axes; touching faces count
    pub fn intersects(&self, other: &Aabb) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| axis.of(self.min) <= axis.of(other.max) && axis.of(self.max) >= axis.of(other.min))
    }

    /// Strictly inside on all three axes; points on a face do not count
    pub fn contains_point(&self, p: Vec3) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| axis.of(p) < axis.of(self.max) && axis.of(p) > axis.of(self.min))
    }

    /// Length of the shared interval along `axis` (zero or negative when apart)
    pub fn overlap(&self, other: &Aabb, axis: Axis) -> f32 {
        axis.of(self.max).min(axis.of(other.max)) - axis.of(self.min).max(axis.of(other.min))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Collider {
    /// Mesh-local bounds
    pub bounds: Aabb,
    /// Set when the mesh overlapped another during the current physics pass
    pub colliding: bool,
}

impl Collider {
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let mut collider = Self::default();
        collider.update_size(vertices);
        collider
    }

    /// Recompute the local box from the vertex extrema.
    /// A mesh without vertices gets a point box at its origin.
    pub fn update_size(&mut self, vertices: &[Vertex]) {
        self.bounds = Aabb::from_points(vertices.iter().map(|v| v.coordinates)).unwrap_or_default();
    }

    pub fn world_bounds(&self, position: Vec3) -> Aabb {
        self.bounds.translated(position)
    }
}

/// Axis with the largest absolute component. Among equals the last of
/// X, Y, Z wins.
pub fn separation_axis(direction: Vec3) -> Axis {
    let biggest = direction.x.abs().max(direction.y.abs()).max(direction.z.abs());

    let mut axis = Axis::X;
    for candidate in Axis::ALL {
        if candidate.of(direction).abs() == biggest {
            axis = candidate;
        }
    }
    axis
}

/// Push `other` out of `this` along the separation axis so that its box sits
/// flush against the matching face of `this`.
///
/// The side is chosen from the sign of the X component of the direction,
/// whatever axis was picked. Returns the axis used, or `None` when `other`
/// is anchored (fix value zero).
pub fn fix_intersection(this: &Mesh, other: &mut Mesh) -> Option<Axis> {
    if other.physics.collider_fix_value == 0.0 {
        return None;
    }

    let direction = other.position - this.position;
    let axis = separation_axis(direction);

    let this_box = this.collider.world_bounds(this.position);
    let other_local = other.collider.bounds;

    let target = if direction.x <= 0.0 {
        axis.of(this_box.min) - axis.of(other_local.max)
    } else {
        axis.of(this_box.max) - axis.of(other_local.min)
    };
    axis.set(&mut other.position, target);

    Some(axis)
}

/// Test the mesh at `index` against every mesh registered before it and
/// resolve overlaps. Marks both meshes of each overlapping pair as colliding.
/// Returns the number of overlapping pairs.
pub fn check_collisions(meshes: &mut [Mesh], index: usize) -> usize {
    if index >= meshes.len() {
        return 0;
    }
    let (earlier, rest) = meshes.split_at_mut(index);
    let this = &mut rest[0];

    let mut contacts = 0;
    for other in earlier.iter_mut() {
        let this_box = this.collider.world_bounds(this.position);
        let other_box = other.collider.world_bounds(other.position);

        if !other_box.intersects(&this_box) {
            continue;
        }

        contacts += 1;
        this.collider.colliding = true;
        other.collider.colliding = true;

        if let Some(axis) = fix_intersection(this, other) {
            log::debug!(
                "'{}' pushed out of '{}' along {:?} (overlap was {:.3})",
                other.name,
                this.name,
                axis,
                other_box.overlap(&this_box, axis)
            );
        }
    }
    contacts
}
