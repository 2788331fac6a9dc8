//! # Bounding-Volume Passes
//!
//! - `initialize_bounds` (post-order) computes every node's box from scratch.
//! - `clip_bounds` (pre-order) narrows boxes from the root toward the leaves.
//! - `grow_bounds` (post-order) recombines children into parent boxes.
//!
//! Clipping and regrowth only ever shrink boxes, so alternating them reaches
//! a fixpoint; `tighten_bounds` drives that loop.
//!
//! ## Example
//!
//! ```rust
//! use csg_tree::CsgNode;
//!
//! let mut tree = CsgNode::intersection(CsgNode::sphere(), CsgNode::cuboid());
//! tree.initialize_bounds();
//! assert_eq!(tree.bounds().area(), 12.0);
//! ```

use crate::aabb::Aabb;
use crate::node::{with_stack, CsgNode, CsgOp};
use crate::transform::transform_point;
use config::constants::UNIT_HALF_EXTENT;
use glam::{DMat4, DVec3};

/// Box of an operation from its children's boxes.
///
/// A difference is bounded by its left operand alone.
fn combine(op: CsgOp, left: &Aabb, right: &Aabb) -> Aabb {
    match op {
        CsgOp::Union => left.union(right),
        CsgOp::Intersection => left.intersection(right),
        CsgOp::Difference => *left,
    }
}

/// Image of the canonical cube corners under `transform`.
fn primitive_bounds(transform: &DMat4) -> Aabb {
    let mut bounds = Aabb::empty();
    for x in [-UNIT_HALF_EXTENT, UNIT_HALF_EXTENT] {
        for y in [-UNIT_HALF_EXTENT, UNIT_HALF_EXTENT] {
            for z in [-UNIT_HALF_EXTENT, UNIT_HALF_EXTENT] {
                bounds.add_point(transform_point(transform, DVec3::new(x, y, z)));
            }
        }
    }
    bounds
}

impl CsgNode {
    /// Computes bounds for the whole subtree.
    ///
    /// Complemented primitives get an unbounded box.
    pub fn initialize_bounds(&mut self) {
        match self {
            CsgNode::Primitive {
                transform,
                bounds,
                complement,
                ..
            } => {
                *bounds = if *complement {
                    Aabb::unbounded()
                } else {
                    primitive_bounds(transform)
                };
            }
            CsgNode::Operation {
                op,
                left,
                right,
                bounds,
                ..
            } => {
                with_stack(|| {
                    left.initialize_bounds();
                    right.initialize_bounds();
                });
                *bounds = combine(*op, &left.bounds(), &right.bounds());
            }
        }
    }

    /// Intersects this node's box with `clip`, then clips the children with
    /// the narrowed box.
    ///
    /// Returns true if any box in the subtree lost area.
    pub fn clip_bounds(&mut self, clip: &Aabb) -> bool {
        let base_area = self.bounds().area();
        let narrowed = self.bounds().intersection(clip);
        self.set_bounds(narrowed);

        let mut shrunk = narrowed.area() < base_area;
        if let Some((left, right)) = self.children_mut() {
            with_stack(|| {
                shrunk |= left.clip_bounds(&narrowed);
                shrunk |= right.clip_bounds(&narrowed);
            });
        }
        shrunk
    }

    /// Recombines children's boxes into their parents, bottom-up.
    ///
    /// Leaves keep their box and report false. Returns true if any box in the
    /// subtree lost area.
    pub fn grow_bounds(&mut self) -> bool {
        let CsgNode::Operation {
            op,
            left,
            right,
            bounds,
            ..
        } = self
        else {
            return false;
        };

        let mut shrunk = with_stack(|| {
            let left_shrunk = left.grow_bounds();
            let right_shrunk = right.grow_bounds();
            left_shrunk | right_shrunk
        });

        let base_area = bounds.area();
        *bounds = combine(*op, &left.bounds(), &right.bounds());
        shrunk |= bounds.area() < base_area;
        shrunk
    }

    /// Alternates clipping (by the root's own box) and regrowth until
    /// neither shrinks anything, or `max_passes` passes have run.
    ///
    /// Returns the number of passes run. Call `initialize_bounds` first.
    pub fn tighten_bounds(&mut self, max_passes: usize) -> usize {
        let mut passes = 0;
        while passes < max_passes {
            passes += 1;
            let own = self.bounds();
            let clipped = self.clip_bounds(&own);
            let grown = self.grow_bounds();
            if !clipped && !grown {
                break;
            }
        }
        tracing::debug!(passes, area = self.bounds().area(), "tightened bounds");
        passes
    }
}

// =============================================================================
// TESTS
// =============================================================================
