//! # Point Membership
//!
//! Signed distance evaluation of a CSG tree: negative inside, positive
//! outside. Primitive distances are measured in object space, so the sign is
//! exact while the magnitude is only a bound under non-uniform scaling.
//!
//! ## Example
//!
//! ```rust
//! use csg_tree::CsgNode;
//! use glam::DVec3;
//!
//! let shell = CsgNode::difference(CsgNode::cuboid(), CsgNode::sphere());
//! assert!(!shell.contains(DVec3::ZERO));
//! assert!(shell.contains(DVec3::splat(0.9)));
//! ```

use crate::node::{with_stack, CsgNode, CsgOp, PrimitiveKind};
use crate::transform::transform_point;
use glam::DVec3;

/// Distance from a canonical shape in object space.
fn shape_distance(shape: PrimitiveKind, q: DVec3) -> f64 {
    match shape {
        PrimitiveKind::Sphere => q.length() - 1.0,
        PrimitiveKind::Box => q.abs().max_element() - 1.0,
        PrimitiveKind::Cylinder => (q.truncate().length() - 1.0).max(q.z.abs() - 1.0),
    }
}

impl CsgNode {
    /// Signed distance from `point` to the solid; negative inside.
    ///
    /// Union takes the minimum, intersection the maximum, and `A − B` is
    /// `max(a, −b)`. A complement flag on any node negates its distance.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        let distance = match self {
            CsgNode::Primitive {
                shape, transform, ..
            } => {
                let local = transform_point(&transform.inverse(), point);
                shape_distance(*shape, local)
            }
            CsgNode::Operation { op, left, right, .. } => {
                let (a, b) = with_stack(|| (left.signed_distance(point), right.signed_distance(point)));
                match op {
                    CsgOp::Union => a.min(b),
                    CsgOp::Intersection => a.max(b),
                    CsgOp::Difference => a.max(-b),
                }
            }
        };

        if self.is_complement() {
            -distance
        } else {
            distance
        }
    }

    /// Checks if `point` lies strictly inside the solid.
    pub fn contains(&self, point: DVec3) -> bool {
        self.signed_distance(point) < 0.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
