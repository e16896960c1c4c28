//! Integration tests for the diagnostics payload exposed to tooling.

use ftl::{Bundle, ErrorKind, ResolveError, parse};
use serde_json::json;

#[test]
fn junk_serializes_content_and_annotations() {
    let resource = parse("ok = Ok\nerr = {}\n");
    let junk = resource.junk().next().unwrap();
    let value = serde_json::to_value(junk).unwrap();
    assert_eq!(
        value,
        json!({
            "content": "err = {}\n",
            "annotations": [{
                "code": "E0028",
                "message": "Expected an inline expression",
                "span": { "start": 15, "end": 16 },
            }],
            "span": { "start": 8, "end": 17 },
        })
    );
}

#[test]
fn resource_serializes_with_type_tags() {
    let resource = parse("hello = Hi { $name }\n");
    let value = serde_json::to_value(&resource).unwrap();
    assert_eq!(
        value,
        json!({
            "body": [{
                "type": "Message",
                "id": { "name": "hello" },
                "value": {
                    "elements": [
                        { "type": "Text", "value": "Hi " },
                        {
                            "type": "Placeable",
                            "expression": {
                                "type": "VariableReference",
                                "id": { "name": "name" },
                            },
                        },
                    ],
                },
                "attributes": [],
                "comment": null,
                "span": { "start": 0, "end": 20 },
            }],
        })
    );
}

#[test]
fn resolve_errors_serialize_kind_and_message() {
    let mut bundle = Bundle::new("en");
    bundle
        .add_source("a = { b }\nb = { a }\nc = { $x } { NOPE() }\n")
        .unwrap();

    let (_, errors) = bundle.format("a", None);
    assert_eq!(
        serde_json::to_value(&errors).unwrap(),
        json!([{ "kind": "CyclicReferenceError", "message": "cyclic reference to 'a'" }])
    );

    let (_, errors) = bundle.format("c", None);
    assert_eq!(
        serde_json::to_value(&errors).unwrap(),
        json!([
            { "kind": "ReferenceError", "message": "unknown variable '$x'" },
            { "kind": "ResolutionError", "message": "unknown function 'NOPE'" },
        ])
    );
}

#[test]
fn error_kinds_display_taxonomy_names() {
    let names: Vec<String> = [
        ErrorKind::Reference,
        ErrorKind::Resolution,
        ErrorKind::CyclicReference,
        ErrorKind::Syntax,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(
        names,
        ["ReferenceError", "ResolutionError", "CyclicReferenceError", "SyntaxError"]
    );
}

#[test]
fn limit_errors_are_resolution_errors() {
    assert_eq!(
        ResolveError::DepthExceeded { max: 1 }.kind(),
        ErrorKind::Resolution
    );
    assert_eq!(ResolveError::NoVariants.kind(), ErrorKind::Resolution);
    assert_eq!(
        ResolveError::TooManyPlaceables { max: 1 }.to_string(),
        "too many placeables (limit 1)"
    );
}
