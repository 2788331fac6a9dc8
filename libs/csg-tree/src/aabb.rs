//! # Axis-Aligned Bounding Box
//!
//! Bounds of CSG nodes. A box is valid when `min <= max` on every axis; the
//! empty box is inverted so that adding the first point makes it valid.
//!
//! ## Example
//!
//! ```rust
//! use csg_tree::Aabb;
//! use glam::DVec3;
//!
//! let a = Aabb::new(DVec3::ZERO, DVec3::ONE);
//! let b = Aabb::new(DVec3::splat(2.0), DVec3::splat(3.0));
//! assert!(!a.intersection(&b).is_valid());
//! assert_eq!(a.union(&b).max, DVec3::splat(3.0));
//! ```

use config::constants::UNBOUNDED_EXTENT;
use glam::DVec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (x, y, z)
    pub min: DVec3,
    /// Maximum corner (x, y, z)
    pub max: DVec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Creates a new bounding box from min/max corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Creates an empty (invalid) bounding box.
    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Box used for complemented shapes, which extend over the whole space.
    pub fn unbounded() -> Self {
        Self {
            min: DVec3::splat(-UNBOUNDED_EXTENT),
            max: DVec3::splat(UNBOUNDED_EXTENT),
        }
    }

    /// Checks if the bounding box is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Expands this box to include a point.
    pub fn add_point(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest box enclosing both boxes.
    ///
    /// An invalid operand contributes nothing.
    pub fn union(&self, other: &Aabb) -> Aabb {
        if !self.is_valid() {
            return *other;
        }
        if !other.is_valid() {
            return *self;
        }
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Overlap of both boxes; invalid if they are disjoint or either is
    /// invalid.
    pub fn intersection(&self, other: &Aabb) -> Aabb {
        if !self.is_valid() || !other.is_valid() || !self.overlaps(other) {
            return Aabb::empty();
        }
        Aabb::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Checks if this bounding box overlaps with another (touching counts).
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Checks if a point lies inside or on the box.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Extent along each axis; zero for invalid boxes.
    pub fn size(&self) -> DVec3 {
        if !self.is_valid() {
            return DVec3::ZERO;
        }
        self.max - self.min
    }

    /// Surface-area heuristic: `xy + yz + zx` of the size.
    ///
    /// Invalid boxes have zero area, so collapsing a box always reduces it.
    pub fn area(&self) -> f64 {
        let size = self.size();
        size.x * size.y + size.y * size.z + size.z * size.x
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Aabb {
        Aabb::new(DVec3::splat(-1.0), DVec3::splat(1.0))
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(!Aabb::empty().is_valid());
        assert_eq!(Aabb::empty().area(), 0.0);
        assert_eq!(Aabb::default(), Aabb::empty());
    }

    #[test]
    fn test_add_point() {
        let mut aabb = Aabb::empty();
        aabb.add_point(DVec3::new(1.0, 2.0, 3.0));
        assert!(aabb.is_valid());
        aabb.add_point(DVec3::new(-1.0, 0.0, 5.0));
        assert_eq!(aabb.min, DVec3::new(-1.0, 0.0, 3.0));
        assert_eq!(aabb.max, DVec3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_union_ignores_invalid() {
        assert_eq!(unit().union(&Aabb::empty()), unit());
        assert_eq!(Aabb::empty().union(&unit()), unit());
    }

    #[test]
    fn test_intersection() {
        let shifted = Aabb::new(DVec3::ZERO, DVec3::splat(2.0));
        let overlap = unit().intersection(&shifted);
        assert_eq!(overlap, Aabb::new(DVec3::ZERO, DVec3::ONE));
        assert!(!unit().intersection(&Aabb::empty()).is_valid());
    }

    #[test]
    fn test_touching_boxes_intersect_in_a_face() {
        let right = Aabb::new(DVec3::new(1.0, -1.0, -1.0), DVec3::new(3.0, 1.0, 1.0));
        let face = unit().intersection(&right);
        assert!(face.is_valid());
        assert_eq!(face.size().x, 0.0);
    }

    #[test]
    fn test_area() {
        assert_eq!(unit().area(), 12.0);
        let slab = Aabb::new(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(slab.area(), 2.0 + 6.0 + 3.0);
    }

    #[test]
    fn test_unbounded_area_is_finite() {
        assert!(Aabb::unbounded().area().is_finite());
        assert!(Aabb::unbounded().area() > unit().area());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let aabb = Aabb::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(2.0, 4.0, 6.0));
        assert!(aabb.contains(DVec3::new(2.0, 0.0, 1.0)));
        assert!(!aabb.contains(DVec3::new(2.1, 0.0, 1.0)));
    }
}
