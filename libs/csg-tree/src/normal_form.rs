//! # Normal Forms
//!
//! Two in-place rewrites that move between equivalent tree shapes.
//!
//! - **Positive form** uses only union and intersection; every difference is
//!   pushed down to complement flags on primitives (`A − B = A ∩ ¬B`).
//! - **General form** removes complement flags again, turning them back into
//!   differences with De Morgan's laws.
//!
//! ## Example
//!
//! ```rust
//! use csg_tree::{CsgNode, CsgOp};
//!
//! let mut tree = CsgNode::difference(CsgNode::cuboid(), CsgNode::sphere());
//! tree.to_positive_form();
//! assert_eq!(tree.op(), Some(CsgOp::Intersection));
//! assert!(tree.children().unwrap().1.is_complement());
//!
//! tree.to_general_form();
//! assert_eq!(tree.op(), Some(CsgOp::Difference));
//! assert!(!tree.children().unwrap().1.is_complement());
//! ```

use crate::node::{with_stack, CsgNode, CsgOp};

impl CsgNode {
    /// Rewrites the tree to use only union and intersection.
    ///
    /// Afterwards each primitive's complement flag says whether it appears
    /// negated. Existing primitive flags are overwritten.
    pub fn to_positive_form(&mut self) {
        remove_differences(self, false);
    }

    /// Discharges complement flags into difference operators, bottom-up.
    ///
    /// For an operation with complemented children `L` and/or `R`:
    ///
    /// | children   | union           | intersection    |
    /// |------------|-----------------|-----------------|
    /// | `¬L`, `¬R` | `¬(L ∩ R)`      | `¬(L ∪ R)`      |
    /// | `¬L`, `R`  | `¬(L − R)`      | `R − L`         |
    /// | `L`, `¬R`  | `¬(R − L)`      | `L − R`         |
    ///
    /// The children's flags are cleared; a flag left on the root means the
    /// whole tree is complemented.
    pub fn to_general_form(&mut self) {
        let CsgNode::Operation {
            op,
            left,
            right,
            complement,
            ..
        } = self
        else {
            return;
        };

        with_stack(|| {
            left.to_general_form();
            right.to_general_form();
        });

        match (left.is_complement(), right.is_complement()) {
            (false, false) => return,
            (true, true) => {
                *op = if *op == CsgOp::Union {
                    CsgOp::Intersection
                } else {
                    CsgOp::Union
                };
                *complement = true;
            }
            (true, false) => {
                if *op == CsgOp::Intersection {
                    std::mem::swap(left, right);
                } else {
                    *complement = true;
                }
                *op = CsgOp::Difference;
            }
            (false, true) => {
                if *op != CsgOp::Intersection {
                    std::mem::swap(left, right);
                    *complement = true;
                }
                *op = CsgOp::Difference;
            }
        }

        left.set_complement(false);
        right.set_complement(false);
    }
}

/// Pushes differences down to the leaves under an ambient complement.
///
/// The right operand of a difference is visited with the opposite context.
fn remove_differences(node: &mut CsgNode, complemented: bool) {
    match node {
        CsgNode::Primitive { complement, .. } => *complement = complemented,
        CsgNode::Operation { op, left, right, .. } => {
            let (left_context, right_context) = if *op == CsgOp::Difference {
                *op = if complemented {
                    CsgOp::Union
                } else {
                    CsgOp::Intersection
                };
                (complemented, !complemented)
            } else {
                if complemented {
                    *op = op.dual();
                }
                (complemented, complemented)
            };

            with_stack(|| {
                remove_differences(left, left_context);
                remove_differences(right, right_context);
            });
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
