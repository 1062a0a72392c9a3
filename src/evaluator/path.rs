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

//! Null-safe dotted path resolution against a JSON context

use serde_json::Value;
use std::borrow::Cow;

/// Resolve a dot-separated path against `root`
///
/// Objects are stepped into by key. Arrays answer canonical decimal indices
/// (`items.0`) and `length`. Anything else, including a `null` root, ends
/// the walk with `None` ("no value"). Never fails.
///
/// The result borrows from `root` except for `length`, which is computed.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<Cow<'a, Value>> {
    let mut current = Cow::Borrowed(root);
    for segment in path.split('.') {
        current = match current {
            Cow::Borrowed(value) => step(value, segment)?,
            // only `length` is computed, and numbers have no properties
            Cow::Owned(_) => return None,
        };
    }
    Some(current)
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<Cow<'a, Value>> {
    match value {
        Value::Object(map) => map.get(segment).map(Cow::Borrowed),
        Value::Array(items) if segment == "length" => Some(Cow::Owned(Value::from(items.len()))),
        Value::Array(items) => array_index(segment)
            .and_then(|index| items.get(index))
            .map(Cow::Borrowed),
        _ => None,
    }
}

/// Parse a canonical array index: `0`, or digits without a leading zero
fn array_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical { segment.parse().ok() } else { None }
}

/// Check if a character can start a path segment
pub fn is_segment_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// Check if a character can continue a path segment
pub fn is_segment_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
