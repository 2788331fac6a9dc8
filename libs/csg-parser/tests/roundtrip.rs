use csg_parser::{keys, parse, print, validate, Value};

const SCENE: &str = "\
# OpenSCAD 2019.5
group() {
  multmatrix([[1, 0, 0, 10], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]) {
    difference() {
      cube(size = [2, 2, 2], center = true);
      sphere($fn = 32, r = 1.25);
    }
  }
  intersection() {
    sphere(r = 1);
    cylinder(h = 2, r1 = 1, r2 = 0.5);
  }
  group();
  cone(label = \"tip\", h = -1.5e-3);
}
";

#[test]
fn roundtrip_scene() {
    let document = parse(SCENE).unwrap();
    let text = print(&document).unwrap();
    assert_eq!(parse(&text).unwrap(), document);
}

#[test]
fn roundtrip_is_stable_after_first_print() {
    let document = parse(SCENE).unwrap();
    let first = print(&document).unwrap();
    let second = print(&parse(&first).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn roundtrip_preserves_version() {
    let document = parse(SCENE).unwrap();
    assert_eq!(document.get(keys::VERSION_NAME), Some(&Value::from("OpenSCAD")));
    assert_eq!(document.get(keys::VERSION_MAJOR), Some(&Value::from(2019.0)));
    assert_eq!(document.get(keys::VERSION_MINOR), Some(&Value::from(5.0)));
    assert!(print(&document).unwrap().starts_with("# OpenSCAD 2019.5\n"));
}

#[test]
fn roundtrip_through_json() {
    let document = parse(SCENE).unwrap();
    let json = serde_json::to_string(&document).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back, document);
    assert!(validate(&back).is_empty());
}

#[test]
fn roundtrip_handwritten_json() {
    let json = r#"{
        "type": "CSG file",
        "version-name": "undefined",
        "version-major": 0,
        "version-minor": 0,
        "contents": [
            {"type": "union", "properties": {}, "objects": [
                {"type": "cube", "properties": {"size": [1, 2, 3]}},
                {"type": "sphere", "properties": {"r": 0.5}}
            ]}
        ]
    }"#;
    let document: Value = serde_json::from_str(json).unwrap();
    let reparsed = parse(&print(&document).unwrap()).unwrap();
    assert_eq!(reparsed, document);
}

#[test]
fn deep_documents_print_and_validate() {
    let depth = 2_000;
    let source = format!(
        "{}sphere();{}",
        "union() { sphere(); ".repeat(depth),
        " }".repeat(depth)
    );
    let document = parse(&source).unwrap();
    let text = print(&document).unwrap();
    assert_eq!(text.matches("union() {").count(), depth);
    assert!(validate(&document).is_empty());
    assert!(serde_json::to_string(&document).is_ok());
}
