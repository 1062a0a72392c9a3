// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Recursive interpolation over value trees

use serde_json::Value;

use super::interpolator::Interpolator;
use crate::diagnostics::DiagnosticSink;
use crate::model::Node;

impl<S: DiagnosticSink> Interpolator<S> {
    /// Interpolate every string leaf of `node`
    ///
    /// Returns a freshly allocated tree of the same shape. Mapping keys keep
    /// their order, scalars are copied, and opaque values are shared with the
    /// input rather than traversed.
    pub fn interpolate_deep(&self, node: &Node, context: &Value) -> Node {
        match node {
            Node::String(template) => Node::String(self.interpolate(template, context)),
            Node::Sequence(items) => Node::Sequence(
                items
                    .iter()
                    .map(|item| self.interpolate_deep(item, context))
                    .collect(),
            ),
            Node::Mapping(entries) => Node::Mapping(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), self.interpolate_deep(value, context)))
                    .collect(),
            ),
            Node::Scalar(_) | Node::Opaque(_) => node.clone(),
        }
    }

    /// Interpolate every string leaf of a plain JSON document
    ///
    /// Object keys come out in the order they went in.
    pub fn interpolate_json(&self, value: &Value, context: &Value) -> Value {
        match value {
            Value::String(template) => Value::String(self.interpolate(template, context)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.interpolate_json(item, context))
                    .collect(),
            ),
            Value::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), self.interpolate_json(value, context)))
                    .collect(),
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        }
    }
}

/// Interpolate every string leaf of `node`, logging failures
pub fn interpolate_deep(node: &Node, context: &Value) -> Node {
    Interpolator::new().interpolate_deep(node, context)
}

/// Interpolate every string leaf of a JSON document, logging failures
pub fn interpolate_json(value: &Value, context: &Value) -> Value {
    Interpolator::new().interpolate_json(value, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::SilentSink;
    use crate::model::{Opaque, Scalar};
    use serde_json::json;

    #[test]
    fn test_scalars_unchanged() {
        let interpolator = Interpolator::with_sink(SilentSink);
        for node in [
            Node::from(42.0),
            Node::from(true),
            Node::null(),
            Node::undefined(),
            Node::Scalar(Scalar::Number(f64::INFINITY)),
        ] {
            assert_eq!(interpolator.interpolate_deep(&node, &json!({})), node);
        }
    }

    #[test]
    fn test_opaque_shared() {
        let interpolator = Interpolator::with_sink(SilentSink);
        let handle = Opaque::new(vec![1u8, 2, 3]);
        let input = Node::sequence([Node::Opaque(handle.clone()), Node::from("~{x}")]);

        let output = interpolator.interpolate_deep(&input, &json!({"x": "X"}));

        let Node::Sequence(items) = output else {
            panic!("Expected sequence node");
        };
        assert!(items[0].as_opaque().is_some_and(|o| o.ptr_eq(&handle)));
        assert_eq!(items[1].as_str(), Some("X"));
    }

    #[test]
    fn test_key_order_preserved() {
        let interpolator = Interpolator::with_sink(SilentSink);
        let input = Node::mapping([
            ("zeta", Node::from("~{a}")),
            ("alpha", Node::from("~{b}")),
            ("mid", Node::from(1.0)),
        ]);

        let Node::Mapping(output) = interpolator.interpolate_deep(&input, &json!({"a": 1, "b": 2}))
        else {
            panic!("Expected mapping node");
        };
        let keys: Vec<&str> = output.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(output["zeta"], Node::from("1"));
        assert_eq!(output["alpha"], Node::from("2"));
    }

    #[test]
    fn test_json_documents() {
        let interpolator = Interpolator::with_sink(SilentSink);
        let doc = json!({"path": "user/~{id}", "n": 3, "list": ["~{id}", null]});

        assert_eq!(
            interpolator.interpolate_json(&doc, &json!({"id": 42})),
            json!({"path": "user/42", "n": 3, "list": ["42", null]})
        );
    }

    #[test]
    fn test_json_key_order_preserved() {
        let interpolator = Interpolator::with_sink(SilentSink);
        let doc: Value =
            serde_json::from_str(r#"{"zeta": "~{a}", "alpha": {"y": 1, "b": "~{a}"}, "mid": 2}"#)
                .unwrap();

        let output = interpolator.interpolate_json(&doc, &json!({"a": "A"}));

        let keys: Vec<&str> = output.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        let inner: Vec<&str> = output["alpha"].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(inner, ["y", "b"]);
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            r#"{"zeta":"A","alpha":{"y":1,"b":"A"},"mid":2}"#
        );
    }
}
