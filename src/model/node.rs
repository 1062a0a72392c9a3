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

//! Tree model walked by the structural interpolator
//!
//! A [`Node`] is either a scalar, a string leaf, a sequence, a plain mapping,
//! or an [`Opaque`] host value that is carried through without inspection.

use indexmap::IndexMap;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Non-string leaf values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// No value
    Undefined,
    /// Explicit null
    Null,
    /// Boolean leaf
    Bool(bool),
    /// Numeric leaf
    Number(f64),
}

/// Host value that the structural interpolator never descends into
///
/// Dates, compiled patterns and other behaviour-carrying objects are wrapped
/// here. Cloning shares the underlying allocation, so identity survives a
/// structural pass and can be checked with [`Opaque::ptr_eq`].
#[derive(Clone)]
pub struct Opaque(Arc<dyn Any + Send + Sync>);

impl Opaque {
    /// Wrap a host value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wrap an already shared host value without reallocating
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Check whether the wrapped value is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Whether both handles point at the same host value
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({:p})", Arc::as_ptr(&self.0))
    }
}

/// Identity comparison: two opaque values are equal when they share storage
impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// A node in an interpolatable value tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Number, boolean, null or no value
    Scalar(Scalar),
    /// String leaf, the only kind that gets interpolated
    String(String),
    /// Ordered sequence
    Sequence(Vec<Node>),
    /// Plain mapping; iteration order is insertion order
    Mapping(IndexMap<String, Node>),
    /// Host value passed through by reference
    Opaque(Opaque),
}

impl Node {
    /// Create a null node
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Create a no-value node
    pub fn undefined() -> Self {
        Self::Scalar(Scalar::Undefined)
    }

    /// Create an opaque node around a host value
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Opaque::new(value))
    }

    /// Create a mapping node from key/value pairs
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Create a sequence node
    pub fn sequence(items: impl IntoIterator<Item = Node>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    /// Get the string leaf, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key in a mapping node
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Get the opaque handle, if this is one
    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Self::Opaque(o) => Some(o),
            _ => None,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Number(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::null(),
            Value::Bool(b) => b.into(),
            Value::Number(n) => Self::Scalar(Scalar::Number(n.as_f64().unwrap_or(f64::NAN))),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_opaque_identity() {
        let original = Opaque::new(String::from("2025-01-01"));
        let cloned = original.clone();
        let other = Opaque::new(String::from("2025-01-01"));

        assert!(original.ptr_eq(&cloned));
        assert!(!original.ptr_eq(&other));
        assert_eq!(
            cloned.downcast_ref::<String>().map(String::as_str),
            Some("2025-01-01")
        );
        assert!(!cloned.is::<u32>());
    }

    #[test]
    fn test_from_json() {
        let node = Node::from(json!({"a": [1, "x", null], "b": true}));

        let Node::Mapping(map) = &node else {
            panic!("Expected mapping node");
        };
        assert_eq!(map.len(), 2);
        assert_eq!(
            node.get("a"),
            Some(&Node::sequence([Node::from(1.0), Node::from("x"), Node::null()]))
        );
        assert_eq!(node.get("b"), Some(&Node::from(true)));
        assert_eq!(node.get("missing"), None);
    }
}
