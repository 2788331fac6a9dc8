//! # CSG Tree Nodes
//!
//! A strict binary tree: every operation node owns exactly two children and
//! no subtree is shared. Cloning a node clones its whole subtree.
//!
//! ## Example
//!
//! ```rust
//! use csg_tree::{CsgNode, CsgOp};
//!
//! let tree = CsgNode::difference(CsgNode::cuboid(), CsgNode::sphere());
//! assert_eq!(tree.op(), Some(CsgOp::Difference));
//! assert_eq!(tree.primitive_count(), 2);
//! assert_eq!(tree.operation_count(), 1);
//! assert_eq!(tree.height(), 1);
//! ```

use crate::aabb::Aabb;
use config::constants::{DEFAULT_COLOR, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use glam::{DMat4, Vec4};

/// Runs a recursive step with enough stack for deep trees.
pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, f)
}

// =============================================================================
// OPERATORS AND SHAPES
// =============================================================================

/// CSG operation types.
///
/// # Variants
///
/// - `Union`: A ∪ B - combines both volumes
/// - `Intersection`: A ∩ B - keeps only common volume
/// - `Difference`: A - B - subtracts B from A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsgOp {
    /// Union operation: A ∪ B
    Union,
    /// Intersection operation: A ∩ B
    Intersection,
    /// Difference operation: A - B
    Difference,
}

impl CsgOp {
    /// De Morgan dual: union and intersection swap, difference is unchanged.
    pub fn dual(self) -> Self {
        match self {
            CsgOp::Union => CsgOp::Intersection,
            CsgOp::Intersection => CsgOp::Union,
            CsgOp::Difference => CsgOp::Difference,
        }
    }
}

/// Primitive shapes, each defined inside the canonical cube `[-1, 1]³`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Unit sphere
    Sphere,
    /// Cube `[-1, 1]³`
    Box,
    /// Unit-radius cylinder along z with `z ∈ [-1, 1]`
    Cylinder,
}

/// Surface appearance of a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// RGBA color in range [0.0, 1.0]
    pub color: Vec4,
}

impl Material {
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec4::from_array(DEFAULT_COLOR),
        }
    }
}

// =============================================================================
// NODE
// =============================================================================

/// CSG tree node.
///
/// `bounds` is derived data recomputed by the bounds passes. `complement`
/// marks the node as "everything except this shape"; it is meaningful on
/// primitives in positive form and on any node while the general-form
/// rewrite runs.
#[derive(Debug)]
pub enum CsgNode {
    /// Binary boolean operation
    Operation {
        /// The operation type
        op: CsgOp,
        /// Left operand
        left: Box<CsgNode>,
        /// Right operand
        right: Box<CsgNode>,
        /// Derived bounding box
        bounds: Aabb,
        /// Complement flag
        complement: bool,
    },
    /// Transformed primitive shape
    Primitive {
        /// Shape kind
        shape: PrimitiveKind,
        /// Object space to scene space
        transform: DMat4,
        /// Surface material
        material: Material,
        /// Derived bounding box
        bounds: Aabb,
        /// Complement flag
        complement: bool,
    },
}

impl CsgNode {
    /// Creates a primitive node.
    ///
    /// # Arguments
    ///
    /// * `shape` - Shape kind
    /// * `transform` - Accumulated object-to-scene transform
    /// * `material` - Surface material
    pub fn primitive(shape: PrimitiveKind, transform: DMat4, material: Material) -> Self {
        CsgNode::Primitive {
            shape,
            transform,
            material,
            bounds: Aabb::empty(),
            complement: false,
        }
    }

    /// Unit sphere at the origin.
    pub fn sphere() -> Self {
        Self::primitive(PrimitiveKind::Sphere, DMat4::IDENTITY, Material::default())
    }

    /// Cube `[-1, 1]³` at the origin.
    pub fn cuboid() -> Self {
        Self::primitive(PrimitiveKind::Box, DMat4::IDENTITY, Material::default())
    }

    /// Creates an operation node.
    pub fn operation(op: CsgOp, left: CsgNode, right: CsgNode) -> Self {
        CsgNode::Operation {
            op,
            left: Box::new(left),
            right: Box::new(right),
            bounds: Aabb::empty(),
            complement: false,
        }
    }

    /// Creates a union operation node.
    pub fn union(left: CsgNode, right: CsgNode) -> Self {
        Self::operation(CsgOp::Union, left, right)
    }

    /// Creates an intersection operation node.
    pub fn intersection(left: CsgNode, right: CsgNode) -> Self {
        Self::operation(CsgOp::Intersection, left, right)
    }

    /// Creates a difference operation node.
    ///
    /// # Arguments
    ///
    /// * `left` - Shape to subtract from
    /// * `right` - Shape to subtract
    pub fn difference(left: CsgNode, right: CsgNode) -> Self {
        Self::operation(CsgOp::Difference, left, right)
    }

    /// Returns this node with its transform replaced (primitives only).
    pub fn with_transform(mut self, new_transform: DMat4) -> Self {
        if let CsgNode::Primitive { transform, .. } = &mut self {
            *transform = new_transform;
        }
        self
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn is_leaf(&self) -> bool {
        matches!(self, CsgNode::Primitive { .. })
    }

    /// Operator of an operation node.
    pub fn op(&self) -> Option<CsgOp> {
        match self {
            CsgNode::Operation { op, .. } => Some(*op),
            CsgNode::Primitive { .. } => None,
        }
    }

    /// Shape of a primitive node.
    pub fn shape(&self) -> Option<PrimitiveKind> {
        match self {
            CsgNode::Primitive { shape, .. } => Some(*shape),
            CsgNode::Operation { .. } => None,
        }
    }

    pub fn transform(&self) -> Option<&DMat4> {
        match self {
            CsgNode::Primitive { transform, .. } => Some(transform),
            CsgNode::Operation { .. } => None,
        }
    }

    pub fn material(&self) -> Option<&Material> {
        match self {
            CsgNode::Primitive { material, .. } => Some(material),
            CsgNode::Operation { .. } => None,
        }
    }

    pub fn children(&self) -> Option<(&CsgNode, &CsgNode)> {
        match self {
            CsgNode::Operation { left, right, .. } => Some((left.as_ref(), right.as_ref())),
            CsgNode::Primitive { .. } => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<(&mut CsgNode, &mut CsgNode)> {
        match self {
            CsgNode::Operation { left, right, .. } => Some((left.as_mut(), right.as_mut())),
            CsgNode::Primitive { .. } => None,
        }
    }

    /// Exchanges the operands of an operation node. No-op for leaves.
    pub fn swap_children(&mut self) {
        if let CsgNode::Operation { left, right, .. } = self {
            std::mem::swap(left, right);
        }
    }

    /// Current derived bounds.
    pub fn bounds(&self) -> Aabb {
        match self {
            CsgNode::Operation { bounds, .. } | CsgNode::Primitive { bounds, .. } => *bounds,
        }
    }

    pub(crate) fn set_bounds(&mut self, new_bounds: Aabb) {
        match self {
            CsgNode::Operation { bounds, .. } | CsgNode::Primitive { bounds, .. } => {
                *bounds = new_bounds
            }
        }
    }

    pub fn is_complement(&self) -> bool {
        match self {
            CsgNode::Operation { complement, .. } | CsgNode::Primitive { complement, .. } => {
                *complement
            }
        }
    }

    pub fn set_complement(&mut self, value: bool) {
        match self {
            CsgNode::Operation { complement, .. } | CsgNode::Primitive { complement, .. } => {
                *complement = value
            }
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Edges on the longest path to a leaf; 0 for a leaf.
    pub fn height(&self) -> usize {
        match self {
            CsgNode::Primitive { .. } => 0,
            CsgNode::Operation { left, right, .. } => {
                with_stack(|| 1 + left.height().max(right.height()))
            }
        }
    }

    /// Counts the number of leaf nodes in the tree.
    pub fn primitive_count(&self) -> usize {
        match self {
            CsgNode::Primitive { .. } => 1,
            CsgNode::Operation { left, right, .. } => {
                with_stack(|| left.primitive_count() + right.primitive_count())
            }
        }
    }

    /// Counts the number of operation nodes in the tree.
    pub fn operation_count(&self) -> usize {
        match self {
            CsgNode::Primitive { .. } => 0,
            CsgNode::Operation { left, right, .. } => {
                with_stack(|| 1 + left.operation_count() + right.operation_count())
            }
        }
    }

    /// True for a leaf, or an intersection of convex subtrees.
    pub fn is_convex(&self) -> bool {
        match self {
            CsgNode::Primitive { .. } => true,
            CsgNode::Operation { op, left, right, .. } => {
                *op == CsgOp::Intersection && with_stack(|| left.is_convex() && right.is_convex())
            }
        }
    }

    /// Independent copy of the subtree with derived bounds reset.
    ///
    /// Structure, operators, shapes, transforms, materials and complement
    /// flags are copied.
    pub fn deep_copy(&self) -> CsgNode {
        with_stack(|| match self {
            CsgNode::Operation {
                op,
                left,
                right,
                complement,
                ..
            } => CsgNode::Operation {
                op: *op,
                left: Box::new(left.deep_copy()),
                right: Box::new(right.deep_copy()),
                bounds: Aabb::empty(),
                complement: *complement,
            },
            CsgNode::Primitive {
                shape,
                transform,
                material,
                complement,
                ..
            } => CsgNode::Primitive {
                shape: *shape,
                transform: *transform,
                material: *material,
                bounds: Aabb::empty(),
                complement: *complement,
            },
        })
    }
}

impl Clone for CsgNode {
    fn clone(&self) -> Self {
        with_stack(|| match self {
            CsgNode::Operation {
                op,
                left,
                right,
                bounds,
                complement,
            } => CsgNode::Operation {
                op: *op,
                left: left.clone(),
                right: right.clone(),
                bounds: *bounds,
                complement: *complement,
            },
            CsgNode::Primitive {
                shape,
                transform,
                material,
                bounds,
                complement,
            } => CsgNode::Primitive {
                shape: *shape,
                transform: *transform,
                material: *material,
                bounds: *bounds,
                complement: *complement,
            },
        })
    }
}

impl PartialEq for CsgNode {
    fn eq(&self, other: &Self) -> bool {
        with_stack(|| match (self, other) {
            (
                CsgNode::Operation {
                    op: a_op,
                    left: a_left,
                    right: a_right,
                    bounds: a_bounds,
                    complement: a_complement,
                },
                CsgNode::Operation {
                    op: b_op,
                    left: b_left,
                    right: b_right,
                    bounds: b_bounds,
                    complement: b_complement,
                },
            ) => {
                a_op == b_op
                    && a_bounds == b_bounds
                    && a_complement == b_complement
                    && a_left == b_left
                    && a_right == b_right
            }
            (
                CsgNode::Primitive {
                    shape: a_shape,
                    transform: a_transform,
                    material: a_material,
                    bounds: a_bounds,
                    complement: a_complement,
                },
                CsgNode::Primitive {
                    shape: b_shape,
                    transform: b_transform,
                    material: b_material,
                    bounds: b_bounds,
                    complement: b_complement,
                },
            ) => {
                a_shape == b_shape
                    && a_transform == b_transform
                    && a_material == b_material
                    && a_bounds == b_bounds
                    && a_complement == b_complement
            }
            _ => false,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_queries() {
        let sphere = CsgNode::sphere();
        assert!(sphere.is_leaf());
        assert_eq!(sphere.height(), 0);
        assert_eq!(sphere.primitive_count(), 1);
        assert_eq!(sphere.operation_count(), 0);
        assert!(sphere.is_convex());
        assert_eq!(sphere.op(), None);
        assert_eq!(sphere.shape(), Some(PrimitiveKind::Sphere));
    }

    #[test]
    fn test_height_uses_longest_branch() {
        let deep = CsgNode::union(
            CsgNode::sphere(),
            CsgNode::intersection(
                CsgNode::sphere(),
                CsgNode::difference(CsgNode::cuboid(), CsgNode::sphere()),
            ),
        );
        assert_eq!(deep.height(), 3);
        assert_eq!(deep.primitive_count(), 4);
        assert_eq!(deep.operation_count(), 3);
    }

    #[test]
    fn test_convexity() {
        assert!(!CsgNode::union(CsgNode::sphere(), CsgNode::cuboid()).is_convex());
        assert!(CsgNode::intersection(CsgNode::sphere(), CsgNode::cuboid()).is_convex());
        assert!(!CsgNode::difference(CsgNode::sphere(), CsgNode::cuboid()).is_convex());
        let nested = CsgNode::intersection(
            CsgNode::sphere(),
            CsgNode::union(CsgNode::sphere(), CsgNode::cuboid()),
        );
        assert!(!nested.is_convex());
    }

    #[test]
    fn test_swap_children() {
        let mut node = CsgNode::difference(CsgNode::cuboid(), CsgNode::sphere());
        node.swap_children();
        let (left, right) = node.children().unwrap();
        assert_eq!(left.shape(), Some(PrimitiveKind::Sphere));
        assert_eq!(right.shape(), Some(PrimitiveKind::Box));
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let mut original = CsgNode::union(CsgNode::sphere(), CsgNode::cuboid());
        original.set_complement(true);
        original.initialize_bounds();

        let copy = original.deep_copy();
        assert!(copy.is_complement());
        assert!(!copy.bounds().is_valid());

        original.swap_children();
        if let Some((left, _)) = original.children_mut() {
            left.set_complement(true);
        }
        let (left, right) = copy.children().unwrap();
        assert_eq!(left.shape(), Some(PrimitiveKind::Sphere));
        assert!(!left.is_complement());
        assert_eq!(right.shape(), Some(PrimitiveKind::Box));
    }

    #[test]
    fn test_default_material_is_opaque_white() {
        assert_eq!(Material::default().color, Vec4::ONE);
    }

    #[test]
    fn test_op_dual() {
        assert_eq!(CsgOp::Union.dual(), CsgOp::Intersection);
        assert_eq!(CsgOp::Intersection.dual(), CsgOp::Union);
        assert_eq!(CsgOp::Difference.dual(), CsgOp::Difference);
    }
}
