use csg_parser::{keys, parse, parse_partial, ParseErrorKind, Rule, Value};

fn contents(document: &Value) -> &[Value] {
    document.get(keys::CONTENTS).and_then(Value::as_array).unwrap()
}

#[test]
fn sphere_scenario() {
    let document = parse("sphere(r=1);").unwrap();
    assert_eq!(document.node_type(), Some("CSG file"));
    let items = contents(&document);
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0],
        Value::object([
            ("type", Value::from("sphere")),
            ("properties", Value::object([("r", Value::from(1.0))])),
        ])
    );
}

#[test]
fn whitespace_is_insignificant() {
    let compact = parse("union(){cube();sphere(r=2);}").unwrap();
    let spread = parse("union ( )\r\n{\n\tcube ( ) ;\n  sphere ( r = 2 ) ;\n}\n").unwrap();
    assert_eq!(compact, spread);
}

#[test]
fn number_forms() {
    let document = parse("cube(a = 0, b = -2, c = 3.5, d = 1e3, e = -2.5e-2);").unwrap();
    let properties = contents(&document)[0].get(keys::PROPERTIES).unwrap();
    let expected = [("a", 0.0), ("b", -2.0), ("c", 3.5), ("d", 1000.0), ("e", -0.025)];
    for (name, value) in expected {
        assert_eq!(properties.get(name), Some(&Value::from(value)), "{}", name);
    }
}

#[test]
fn positive_exponent_is_rejected() {
    assert!(parse("cube(a = 1e+3);").is_err());
    assert!(parse("cube(a = 1E3);").is_err());
}

#[test]
fn nested_arrays_and_strings() {
    let document = parse("cube(m = [[1, 2], [], [\"x\", true]]);").unwrap();
    let m = contents(&document)[0].get(keys::PROPERTIES).and_then(|p| p.get("m")).unwrap();
    let rows = m.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].as_array().unwrap().is_empty());
    assert_eq!(rows[2].as_array().unwrap()[0], Value::from("x"));
}

#[test]
fn special_variable_names() {
    let document = parse("sphere($fn = 8, $fa = 12, r = 1);").unwrap();
    let properties = contents(&document)[0].get(keys::PROPERTIES).unwrap();
    assert_eq!(properties.get("$fn"), Some(&Value::from(8.0)));
}

#[test]
fn deeply_nested_instructions() {
    let depth = 500;
    let source = format!("{}cube();{}", "group() { ".repeat(depth), " }".repeat(depth));
    let document = parse(&source).unwrap();
    let mut node = &contents(&document)[0];
    let mut levels = 0;
    while let Some(children) = node.get(keys::OBJECTS).and_then(Value::as_array) {
        node = &children[0];
        levels += 1;
    }
    assert_eq!(levels, depth);
    assert_eq!(node.node_type(), Some("cube"));
}

#[test]
fn very_deep_documents_parse_and_drop() {
    let depth = 20_000;
    let source = format!(
        "{}sphere();{}",
        "union() { cube(); ".repeat(depth),
        " }".repeat(depth)
    );
    let document = parse(&source).unwrap();
    assert_eq!(contents(&document)[0].node_type(), Some("union"));
    drop(document);
}

#[test]
fn missing_semicolon() {
    let error = parse("cube()").unwrap_err();
    assert!(matches!(error.kind, ParseErrorKind::UnexpectedEof { .. }));
}

#[test]
fn object_in_instruction_position_reports_furthest_error() {
    let error = parse("union() { cube() }").unwrap_err();
    assert_eq!(error.rule, Rule::Object);
    assert_eq!(error.offset(), 17);
}

#[test]
fn lenient_parse_keeps_prefix() {
    let parsed = parse_partial("# tool 1.0\ncube();\nsphere(r = 1)\n");
    let error = parsed.error.unwrap();
    assert_eq!(error.span.start.line, 3);
    assert_eq!(contents(&parsed.document).len(), 1);
    assert_eq!(
        parsed.document.get(keys::VERSION_NAME),
        Some(&Value::from("tool"))
    );
}
