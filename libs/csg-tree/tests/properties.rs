//! Structural properties of loaded trees and their rewrites.

use config::constants::GlobalConfig;
use csg_parser::parse;
use csg_tree::{load_tree, prepare, Aabb, CsgNode, CsgOp, PrimitiveKind};
use glam::DVec3;

const SCENES: &[&str] = &[
    "sphere(r=1);",
    "union(){ sphere(r=1); cube(size=[2,1,1]); }",
    "difference(){ cube(size=[1,1,1]); sphere(r=0.5); }",
    "difference(){ cube(size=[2,2,2]); sphere(r=1.4); cube(size=[3,0.5,0.5]); }",
    "intersection(){ sphere(r=1.3); cube(); difference(){ cube(size=[2,2,0.6]); sphere(r=0.4); } }",
    "multmatrix([[1,0,0,0.7],[0,1,0,0],[0,0,1,0],[0,0,0,1]]) {\n\
       difference(){ sphere(r=1.2); multmatrix([[1,0,0,0],[0,1,0,0.8],[0,0,1,0],[0,0,0,1]]) { cube(size=[0.5,0.5,2]); } }\n\
     }\n\
     difference(){ cube(size=[0.3,0.3,0.3]); difference(){ sphere(r=0.2); cube(size=0.1); } }",
];

fn load(source: &str) -> CsgNode {
    load_tree(&parse(source).expect("scene parses")).expect("scene loads")
}

fn grid() -> Vec<DVec3> {
    let axis: Vec<f64> = (0..9).map(|i| -1.9 + 0.43 * i as f64).collect();
    let mut points = Vec::new();
    for &x in &axis {
        for &y in &axis {
            for &z in &axis {
                points.push(DVec3::new(x, y, z));
            }
        }
    }
    points
}

fn for_each_node(node: &CsgNode, visit: &mut impl FnMut(&CsgNode)) {
    visit(node);
    if let Some((left, right)) = node.children() {
        for_each_node(left, visit);
        for_each_node(right, visit);
    }
}

fn areas(node: &CsgNode) -> Vec<f64> {
    let mut out = Vec::new();
    for_each_node(node, &mut |n| out.push(n.bounds().area()));
    out
}

#[test]
fn single_operand_union_is_unwrapped() {
    for source in ["union(){ cube(); }", "group(){ difference(){ cube(); sphere(); } }"] {
        let tree = load(source);
        let inner = load(&source[source.find('{').unwrap() + 1..source.rfind('}').unwrap()]);
        assert_eq!(tree.height(), inner.height(), "{}", source);
        assert_eq!(tree, inner);
    }
}

#[test]
fn loaded_trees_are_strictly_binary() {
    for source in SCENES {
        let tree = load(source);
        assert_eq!(
            tree.operation_count(),
            tree.primitive_count() - 1,
            "{}",
            source
        );
    }
}

#[test]
fn clipping_never_grows_a_box() {
    for source in SCENES {
        let mut tree = load(source);
        tree.initialize_bounds();

        let clip = Aabb::new(DVec3::splat(-0.5), DVec3::splat(5.0));
        let before = areas(&tree);
        tree.clip_bounds(&clip);
        let after = areas(&tree);
        for (b, a) in before.iter().zip(&after) {
            assert!(a <= b, "{}: {} grew to {}", source, b, a);
        }
    }
}

#[test]
fn tightening_converges_monotonically() {
    for source in SCENES {
        let mut tree = load(source);
        tree.initialize_bounds();

        let mut previous = areas(&tree);
        let mut passes = 0;
        loop {
            passes += 1;
            assert!(passes < 64, "{} did not converge", source);
            let own = tree.bounds();
            let clipped = tree.clip_bounds(&own);
            let grown = tree.grow_bounds();

            let current = areas(&tree);
            for (p, c) in previous.iter().zip(&current) {
                assert!(c <= p, "{}: area rose from {} to {}", source, p, c);
            }
            previous = current;
            if !clipped && !grown {
                break;
            }
        }
    }
}

#[test]
fn tightened_bounds_still_contain_the_solid() {
    let config = GlobalConfig::default();
    for source in SCENES {
        let tree = prepare(&parse(source).unwrap(), &config).unwrap();
        let bounds = tree.bounds();
        for point in grid() {
            if tree.contains(point) {
                assert!(bounds.contains(point), "{}: {:?} escaped", source, point);
            }
        }
    }
}

#[test]
fn positive_form_preserves_membership() {
    for source in SCENES {
        let tree = load(source);
        let mut positive = tree.clone();
        positive.to_positive_form();

        let mut ops = Vec::new();
        for_each_node(&positive, &mut |n| ops.extend(n.op()));
        assert!(!ops.contains(&CsgOp::Difference), "{}", source);

        for point in grid() {
            assert_eq!(tree.contains(point), positive.contains(point), "{} at {:?}", source, point);
        }
    }
}

#[test]
fn normal_forms_round_trip() {
    for source in SCENES {
        let tree = load(source);
        let mut rewritten = tree.clone();
        rewritten.to_positive_form();
        rewritten.to_general_form();

        assert_eq!(rewritten.primitive_count(), tree.primitive_count(), "{}", source);
        for_each_node(&rewritten, &mut |n| {
            if n.is_leaf() {
                assert!(!n.is_complement(), "{}", source);
            }
        });
        for point in grid() {
            assert_eq!(tree.contains(point), rewritten.contains(point), "{} at {:?}", source, point);
        }
    }
}

#[test]
fn convexity() {
    let sphere = CsgNode::sphere;
    let cuboid = CsgNode::cuboid;

    assert!(sphere().is_convex());
    assert!(!CsgNode::union(sphere(), cuboid()).is_convex());
    assert!(CsgNode::intersection(sphere(), cuboid()).is_convex());
    assert!(!CsgNode::difference(sphere(), cuboid()).is_convex());
    assert!(!CsgNode::intersection(sphere(), CsgNode::union(sphere(), cuboid())).is_convex());
}

#[test]
fn sphere_scenario() {
    let document = parse("sphere(r=1);").unwrap();
    let contents = document.get("contents").and_then(|c| c.as_array()).unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].node_type(), Some("sphere"));
    assert_eq!(
        contents[0].get("properties").and_then(|p| p.get("r")).and_then(|r| r.as_f64()),
        Some(1.0)
    );

    let tree = load_tree(&document).unwrap();
    assert_eq!(tree.shape(), Some(PrimitiveKind::Sphere));
    assert_eq!(tree.transform(), Some(&glam::DMat4::IDENTITY));
    assert_eq!(tree.height(), 0);
}

#[test]
fn difference_scenario() {
    let tree = load("difference(){ cube(size=[1,1,1]); sphere(r=0.5); }");
    assert_eq!(tree.op(), Some(CsgOp::Difference));
    let (left, right) = tree.children().unwrap();
    assert_eq!(left.shape(), Some(PrimitiveKind::Box));
    assert_eq!(right.shape(), Some(PrimitiveKind::Sphere));
    assert_eq!(tree.primitive_count(), 2);
    assert_eq!(tree.operation_count(), 1);
}

#[test]
fn deep_copy_is_independent() {
    let mut original = load(SCENES[4]);
    original.initialize_bounds();
    let mut copy = original.deep_copy();

    assert_eq!(copy.primitive_count(), original.primitive_count());
    assert!(!copy.bounds().is_valid());

    copy.to_positive_form();
    copy.initialize_bounds();
    assert_eq!(original.op(), Some(CsgOp::Intersection));
    assert!(original.bounds().is_valid());

    let mut negated = 0;
    for_each_node(&original, &mut |n| negated += n.is_complement() as usize);
    assert_eq!(negated, 0);
}

#[test]
fn deep_trees_survive_every_pass() {
    let mut tree = CsgNode::sphere();
    for i in 0..20_000 {
        tree = if i % 2 == 0 {
            CsgNode::difference(tree, CsgNode::cuboid())
        } else {
            CsgNode::union(CsgNode::sphere(), tree)
        };
    }
    assert_eq!(tree.height(), 20_000);

    tree.initialize_bounds();
    tree.tighten_bounds(2);
    tree.to_positive_form();
    tree.to_general_form();
    assert_eq!(tree.primitive_count(), 20_001);

    let copy = tree.deep_copy();
    assert_eq!(copy.height(), 20_000);
    assert_eq!(copy.primitive_count(), 20_001);
    assert_eq!(copy.bounds(), Aabb::empty());
    let clone = tree.clone();
    assert!(clone == tree);

    unlink(tree);
    unlink(copy);
    unlink(clone);
}

/// Drops a left- or right-leaning chain without recursing.
fn unlink(tree: CsgNode) {
    let mut rest = Some(tree);
    while let Some(node) = rest.take() {
        if let CsgNode::Operation { left, right, .. } = node {
            rest = Some(if left.is_leaf() { *right } else { *left });
        }
    }
}
