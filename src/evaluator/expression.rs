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

//! Expression classification and evaluation
//!
//! An expression is either a ternary `cond ? a : b` or a single value. Single
//! values are tried in a fixed order: string literal, keyword literal,
//! numeric literal, identifier path.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::error::{EvaluationError, EvaluationResult};
use super::path::{is_segment_continue, is_segment_start, resolve};
use crate::model::EvaluatedValue;

static NUMBER_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("valid number pattern"));

/// Evaluate a trimmed expression against `context`
pub fn evaluate(expr: &str, context: &Value) -> EvaluationResult<EvaluatedValue> {
    match split_ternary(expr) {
        Some(Ternary::Branches {
            condition,
            truthy,
            falsy,
        }) => {
            let branch = if evaluate(condition, context)?.is_truthy() {
                truthy
            } else {
                falsy
            };
            log::trace!("ternary `{expr}` selected branch `{branch}`");
            evaluate(branch, context)
        }
        Some(Ternary::Malformed) => {
            log::trace!("malformed ternary `{expr}`, evaluating as a single value");
            evaluate_value(expr, context)
        }
        None => evaluate_value(expr, context),
    }
}

/// Outcome of ternary detection
#[derive(Debug, Clone, PartialEq, Eq)]
enum Ternary<'a> {
    /// Well-formed `condition ? truthy : falsy`
    Branches {
        condition: &'a str,
        truthy: &'a str,
        falsy: &'a str,
    },
    /// Looked like a ternary but a part is missing
    Malformed,
}

/// Detect a ternary conditional
///
/// The outer check uses the first `?` and the last `:`; the branch split uses
/// the first `:` after the `?`. The false branch may therefore contain
/// colons, the true branch may not.
fn split_ternary(expr: &str) -> Option<Ternary<'_>> {
    let question = expr.find('?')?;
    let colon = expr.rfind(':')?;

    if question == 0 || question > colon || colon + 1 >= expr.len() {
        return None;
    }

    let condition = expr[..question].trim();
    let rest = expr[question + 1..].trim();
    let Some(inner) = rest.find(':') else {
        return Some(Ternary::Malformed);
    };

    let truthy = rest[..inner].trim();
    let falsy = rest[inner + 1..].trim();
    if condition.is_empty() || truthy.is_empty() || falsy.is_empty() {
        return Some(Ternary::Malformed);
    }

    Some(Ternary::Branches {
        condition,
        truthy,
        falsy,
    })
}

/// Evaluate a single, non-ternary value
fn evaluate_value(value: &str, context: &Value) -> EvaluationResult<EvaluatedValue> {
    if let Some(inner) = string_literal(value) {
        return Ok(EvaluatedValue::Str(inner.to_string()));
    }

    match value {
        "true" => return Ok(EvaluatedValue::Bool(true)),
        "false" => return Ok(EvaluatedValue::Bool(false)),
        "null" => return Ok(EvaluatedValue::Null),
        "undefined" => return Ok(EvaluatedValue::Undefined),
        _ => {}
    }

    if NUMBER_LITERAL.is_match(value) {
        if let Ok(n) = value.parse::<f64>() {
            return Ok(EvaluatedValue::Num(n));
        }
    }

    if is_identifier_path(value) {
        let resolved = EvaluatedValue::from(resolve(context, value).as_deref());
        log::trace!("path `{value}` resolved to {}", resolved.type_name());
        return Ok(resolved);
    }

    Err(EvaluationError::unsupported(value))
}

/// Inner text of a `'...'` or `"..."` literal
///
/// The same quote must open and close the literal. No escape processing is
/// done and the body may not span lines.
fn string_literal(value: &str) -> Option<&str> {
    let quote = value.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    if value.len() < 2 || !value.ends_with(quote) {
        return None;
    }

    let inner = &value[1..value.len() - 1];
    if inner.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return None;
    }
    Some(inner)
}

/// Check for one or more dot-separated identifier segments
pub fn is_identifier_path(value: &str) -> bool {
    value.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars.next().is_some_and(is_segment_start) && chars.all(is_segment_continue)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(expr: &str) -> EvaluatedValue {
        evaluate(expr, &json!({})).expect("expression should evaluate")
    }

    #[test]
    fn test_literals() {
        assert_eq!(eval("\"x\""), EvaluatedValue::from("x"));
        assert_eq!(eval("'x'"), EvaluatedValue::from("x"));
        assert_eq!(eval("''"), EvaluatedValue::from(""));
        assert_eq!(eval("true"), EvaluatedValue::Bool(true));
        assert_eq!(eval("false"), EvaluatedValue::Bool(false));
        assert_eq!(eval("null"), EvaluatedValue::Null);
        assert_eq!(eval("undefined"), EvaluatedValue::Undefined);
        assert_eq!(eval("42"), EvaluatedValue::Num(42.0));
        assert_eq!(eval("-3.14"), EvaluatedValue::Num(-3.14));
        assert_eq!(eval("007"), EvaluatedValue::Num(7.0));
    }

    #[test]
    fn test_string_literal_edges() {
        assert_eq!(string_literal("'it\\'s'"), Some("it\\'s"));
        assert_eq!(string_literal("\"a\" : \"b\""), Some("a\" : \"b"));
        assert_eq!(string_literal("'"), None);
        assert_eq!(string_literal("'mixed\""), None);
        assert_eq!(string_literal("'two\nlines'"), None);
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        for expr in ["1.", ".5", "1e3", "+1", "--1", "١٢"] {
            assert!(evaluate(expr, &json!({})).is_err(), "{expr} should fail");
        }
    }

    #[test]
    fn test_identifier_paths() {
        assert!(is_identifier_path("a"));
        assert!(is_identifier_path("$root._private.x1"));
        assert!(!is_identifier_path("123abc"));
        assert!(!is_identifier_path("a..b"));
        assert!(!is_identifier_path("a."));
        assert!(!is_identifier_path("invalid!"));
        assert!(!is_identifier_path(""));
    }

    #[test]
    fn test_path_lookup() {
        let ctx = json!({"user": {"name": "Bob", "tags": ["a"]}});
        assert_eq!(
            evaluate("user.name", &ctx),
            Ok(EvaluatedValue::from("Bob"))
        );
        assert_eq!(
            evaluate("user.tags", &ctx),
            Ok(EvaluatedValue::Composite(json!(["a"])))
        );
        assert_eq!(evaluate("user.age", &ctx), Ok(EvaluatedValue::Undefined));
    }

    #[test]
    fn test_split_ternary() {
        assert_eq!(
            split_ternary("a ? \"y\" : \"n\""),
            Some(Ternary::Branches {
                condition: "a",
                truthy: "\"y\"",
                falsy: "\"n\"",
            })
        );
        assert_eq!(
            split_ternary("a ? \"yes\" : \"12:30\""),
            Some(Ternary::Branches {
                condition: "a",
                truthy: "\"yes\"",
                falsy: "\"12:30\"",
            })
        );
        assert_eq!(split_ternary("a ? b"), None);
        assert_eq!(split_ternary("a : b"), None);
        assert_eq!(split_ternary("? a : b"), None);
        assert_eq!(split_ternary("a ? b :"), None);
        assert_eq!(split_ternary("a : b ? c"), None);
        assert_eq!(split_ternary("flag ?  : \"b\""), Some(Ternary::Malformed));
    }

    #[test]
    fn test_ternary_evaluation() {
        let ctx = json!({"a": false, "b": true, "n": 0});
        assert_eq!(
            evaluate("a ? \"x\" : b ? \"y\" : \"z\"", &ctx),
            Ok(EvaluatedValue::from("y"))
        );
        assert_eq!(
            evaluate("n ? 1 : 2", &ctx),
            Ok(EvaluatedValue::Num(2.0))
        );
        assert_eq!(
            evaluate("missing ? 'yes' : 'no'", &ctx),
            Ok(EvaluatedValue::from("no"))
        );
    }

    #[test]
    fn test_nested_ternary_in_true_branch_fails() {
        let err = evaluate("a ? b ? \"1\" : \"2\" : \"3\"", &json!({"a": true}))
            .expect_err("true-branch ternary is split at its own colon");
        assert_eq!(err, EvaluationError::unsupported("b ? \"1\""));
    }

    #[test]
    fn test_malformed_ternary_reports_whole_expression() {
        let err = evaluate("flag ?  : \"b\"", &json!({"flag": true})).unwrap_err();
        assert_eq!(err, EvaluationError::unsupported("flag ?  : \"b\""));
    }
}
