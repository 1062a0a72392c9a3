//! Integration tests for recursive interpolation over value trees

use chrono::{DateTime, TimeZone, Utc};
use octofhir_interpolate::{
    CollectingSink, Interpolator, Node, Opaque, Scalar, SilentSink, interpolate_deep,
    interpolate_json,
};
use pretty_assertions::assert_eq;
use regex::Regex;
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_interpolates_objects_recursively() {
    let template = json!({
        "path": "user/~{id}",
        "label": "~{active ? \"enabled\" : \"disabled\"}",
        "meta": {"env": "~{env}"}
    });
    let context = json!({"id": 42, "active": true, "env": "prod"});

    assert_eq!(
        interpolate_json(&template, &context),
        json!({
            "path": "user/42",
            "label": "enabled",
            "meta": {"env": "prod"}
        })
    );
}

#[test]
fn test_interpolates_arrays() {
    let result = interpolate_json(&json!(["~{a}", "~{b}", "static"]), &json!({"a": "X", "b": "Y"}));
    assert_eq!(result, json!(["X", "Y", "static"]));
}

#[test]
fn test_nested_arrays_and_objects() {
    let template = Node::from(json!({
        "items": [{"name": "~{user1}"}, {"name": "~{user2}"}]
    }));
    let context = json!({"user1": "Alice", "user2": "Bob"});

    assert_eq!(
        interpolate_deep(&template, &context),
        Node::from(json!({"items": [{"name": "Alice"}, {"name": "Bob"}]}))
    );
}

#[test]
fn test_non_string_scalars_unchanged() {
    let input = Node::mapping([
        ("num", Node::from(42.0)),
        ("bool", Node::from(true)),
        ("n", Node::null()),
        ("undef", Node::undefined()),
    ]);
    assert_eq!(interpolate_deep(&input, &json!({})), input);
}

#[test]
fn test_does_not_recurse_into_opaque_values() {
    let date: Arc<DateTime<Utc>> = Arc::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    let created_at = Opaque::from_arc(date.clone());
    let input = Node::mapping([("createdAt", Node::Opaque(created_at.clone()))]);

    let result = interpolate_deep(&input, &json!({}));

    let out = result
        .get("createdAt")
        .and_then(Node::as_opaque)
        .expect("createdAt stays opaque");
    assert!(out.ptr_eq(&created_at));
    assert_eq!(out.downcast_ref::<DateTime<Utc>>(), Some(&*date));
}

#[test]
fn test_opaque_values_carrying_templates_are_not_touched() {
    let pattern = Opaque::new(Regex::new(r"~\{x\}").unwrap());
    let input = Node::sequence([Node::Opaque(pattern.clone()), Node::from("~{x}")]);

    let result = Interpolator::with_sink(SilentSink).interpolate_deep(&input, &json!({"x": "1"}));

    let Node::Sequence(items) = result else {
        panic!("Expected sequence node");
    };
    assert!(items[0].as_opaque().is_some_and(|o| o.ptr_eq(&pattern)));
    assert_eq!(
        items[0]
            .as_opaque()
            .and_then(|o| o.downcast_ref::<Regex>())
            .map(Regex::as_str),
        Some(r"~\{x\}")
    );
    assert_eq!(items[1], Node::from("1"));
}

#[test]
fn test_preserves_failure_behavior_in_nested_strings() {
    let sink = CollectingSink::new();
    let interpolator = Interpolator::with_sink(&sink);

    let result = interpolator.interpolate_json(&json!({"bad": "~{invalid!}"}), &json!({}));

    assert_eq!(result, json!({"bad": "~{invalid!}"}));
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_mixed_types() {
    let input = Node::mapping([
        ("str", Node::from("~{name}")),
        ("num", Node::from(100.0)),
        ("arr", Node::sequence([Node::from("~{a}"), Node::from(200.0)])),
        ("obj", Node::mapping([("flag", Node::from("~{active}"))])),
    ]);
    let context = json!({"name": "Test", "a": "A", "active": false});

    let expected = Node::mapping([
        ("str", Node::from("Test")),
        ("num", Node::from(100.0)),
        ("arr", Node::sequence([Node::from("A"), Node::from(200.0)])),
        ("obj", Node::mapping([("flag", Node::from("false"))])),
    ]);
    assert_eq!(interpolate_deep(&input, &context), expected);
}

#[test]
fn test_input_tree_is_not_mutated() {
    let input = Node::mapping([("greeting", Node::from("hi ~{who}"))]);
    let before = input.clone();

    let output = interpolate_deep(&input, &json!({"who": "there"}));

    assert_eq!(input, before);
    assert_eq!(output.get("greeting"), Some(&Node::from("hi there")));
}

#[test]
fn test_scalar_roots() {
    let ctx = json!({"x": 1});
    assert_eq!(interpolate_deep(&Node::from("~{x}"), &ctx), Node::from("1"));
    assert_eq!(
        interpolate_deep(&Node::Scalar(Scalar::Number(7.5)), &ctx),
        Node::Scalar(Scalar::Number(7.5))
    );
    assert_eq!(interpolate_json(&json!(null), &ctx), json!(null));
}
