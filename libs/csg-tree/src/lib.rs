//! # CSG Tree
//!
//! In-memory binary CSG tree built from structured CSG documents.
//!
//! Leaves are primitives (sphere, box, cylinder) carrying an accumulated
//! object-to-scene transform, a material and a complement flag. Internal
//! nodes apply union, intersection or difference to exactly two children.
//!
//! ## Example
//!
//! ```rust
//! use csg_parser::parse;
//! use csg_tree::{load_tree, PrimitiveKind};
//!
//! let document = parse("sphere(r=1);").unwrap();
//! let tree = load_tree(&document).unwrap();
//! assert_eq!(tree.shape(), Some(PrimitiveKind::Sphere));
//! assert_eq!(tree.height(), 0);
//! ```
//!
//! ## Passes
//!
//! - [`CsgNode::initialize_bounds`], [`CsgNode::clip_bounds`],
//!   [`CsgNode::grow_bounds`] and [`CsgNode::tighten_bounds`]
//! - [`CsgNode::to_positive_form`] and [`CsgNode::to_general_form`]
//! - [`CsgNode::signed_distance`] for point membership

pub mod aabb;
pub mod batch;
mod bounds;
mod distance;
pub mod error;
pub mod loader;
pub mod node;
mod normal_form;
pub mod transform;

pub use aabb::Aabb;
pub use batch::{prepare, prepare_all};
pub use error::LoadError;
pub use loader::load_tree;
pub use node::{CsgNode, CsgOp, Material, PrimitiveKind};
