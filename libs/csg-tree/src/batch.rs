//! # Batch Preparation
//!
//! Loads documents and settles their bounding boxes, one tree per document.
//! Independent documents are prepared in parallel with rayon; results keep
//! the input order.

use crate::error::LoadError;
use crate::loader::load_tree;
use crate::node::CsgNode;
use config::constants::GlobalConfig;
use csg_parser::Value;
use rayon::prelude::*;

/// Loads `document`, initializes its bounds and tightens them.
///
/// # Arguments
///
/// * `document` - Structured CSG document
/// * `config` - Supplies the tightening pass limit
pub fn prepare(document: &Value, config: &GlobalConfig) -> Result<CsgNode, LoadError> {
    let mut tree = load_tree(document)?;
    tree.initialize_bounds();
    tree.tighten_bounds(config.max_tightening_passes);
    Ok(tree)
}

/// Prepares every document in parallel.
///
/// The result at index `i` belongs to `documents[i]`; a failing document
/// does not affect the others.
pub fn prepare_all(documents: &[Value], config: &GlobalConfig) -> Vec<Result<CsgNode, LoadError>> {
    let results: Vec<_> = documents
        .par_iter()
        .map(|document| prepare(document, config))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::debug!(documents = documents.len(), failed, "prepared CSG trees");
    results
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::CsgOp;
    use csg_parser::parse;
    use glam::DVec3;

    #[test]
    fn test_prepare_settles_bounds() {
        let document = parse(
            "intersection(){ cube(size=[4,1,1]); \
             multmatrix([[1,0,0,3],[0,1,0,0],[0,0,1,0],[0,0,0,1]]) { sphere(r=1); } }",
        )
        .unwrap();
        let tree = prepare(&document, &GlobalConfig::default()).unwrap();
        assert_eq!(tree.op(), Some(CsgOp::Intersection));
        assert_eq!(tree.bounds().min, DVec3::new(2.0, -1.0, -1.0));
        assert_eq!(tree.bounds().max, DVec3::new(4.0, 1.0, 1.0));

        let (left, _) = tree.children().unwrap();
        assert_eq!(left.bounds(), tree.bounds());
    }

    #[test]
    fn test_prepare_all_keeps_order() {
        let documents: Vec<Value> = ["sphere();", "difference(){ cube(); sphere(); }", "cube();"]
            .iter()
            .map(|s| parse(s).unwrap())
            .collect();
        let trees = prepare_all(&documents, &GlobalConfig::default());

        assert_eq!(trees.len(), 3);
        assert!(trees[0].as_ref().unwrap().is_leaf());
        assert_eq!(trees[1].as_ref().unwrap().op(), Some(CsgOp::Difference));
        assert!(trees[2].as_ref().unwrap().is_leaf());
    }

    #[test]
    fn test_prepare_all_isolates_failures() {
        let documents = vec![parse("cube();").unwrap(), Value::Null, parse("sphere();").unwrap()];
        let trees = prepare_all(&documents, &GlobalConfig::default());
        assert!(trees[0].is_ok());
        assert_eq!(trees[1], Err(LoadError::UnexpectedNull));
        assert!(trees[2].is_ok());
    }

    #[test]
    fn test_prepare_all_empty() {
        assert!(prepare_all(&[], &GlobalConfig::default()).is_empty());
    }
}
