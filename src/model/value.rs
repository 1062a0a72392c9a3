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

//! Core value type produced by expression evaluation

use serde_json::Value;
use std::fmt;

/// Result of evaluating a single template expression
///
/// Literals produce one of the scalar variants directly. Path lookups map
/// JSON scalars onto the same variants and keep objects and arrays as
/// [`EvaluatedValue::Composite`] until they are stringified.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluatedValue {
    /// String value
    Str(String),

    /// Numeric value
    Num(f64),

    /// Boolean value
    Bool(bool),

    /// Explicit null
    Null,

    /// No value: a missing key or the `undefined` literal
    Undefined,

    /// Object or array reached by a path lookup
    Composite(Value),
}

impl EvaluatedValue {
    /// Truthiness used by the ternary conditional
    ///
    /// Falsy values are `false`, `0`, `NaN`, the empty string, null and no
    /// value. Everything else, composites included, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Num(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
            Self::Null | Self::Undefined => false,
            Self::Composite(_) => true,
        }
    }

    /// Get the type name used in log output
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Num(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Composite(Value::Array(_)) => "array",
            Self::Composite(_) => "object",
        }
    }

    /// Render as substitution text; null and no value render as `""`
    pub fn to_template_string(&self) -> String {
        match self {
            Self::Null | Self::Undefined => String::new(),
            other => other.to_string(),
        }
    }
}

impl From<&Value> for EvaluatedValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Num(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::Str(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Composite(value.clone()),
        }
    }
}

impl From<Option<&Value>> for EvaluatedValue {
    fn from(value: Option<&Value>) -> Self {
        value.map_or(Self::Undefined, Self::from)
    }
}

impl From<&str> for EvaluatedValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl fmt::Display for EvaluatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => f.write_str(&format_number(*n)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::Undefined => f.write_str("undefined"),
            Self::Composite(v) => f.write_str(&render_composite(v)),
        }
    }
}

/// Render an object or array reached by a path lookup
///
/// Arrays join their elements with `,`, rendering null elements as empty
/// text and flattening nested arrays the same way. Objects render as
/// `[object Object]`.
pub fn render_composite(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => format_number(n.as_f64().unwrap_or(f64::NAN)),
                Value::String(s) => s.clone(),
                Value::Array(_) | Value::Object(_) => render_composite(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        scalar => EvaluatedValue::from(scalar).to_template_string(),
    }
}

/// Format a number in its canonical decimal form
///
/// Integral values drop the fractional part, negative zero prints as `0`,
/// and very large or very small magnitudes switch to exponent notation with
/// an explicit sign (`1e+21`, `1e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{n:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }

    n.to_string()
}
