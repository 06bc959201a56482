//! Tree node representation for searchable documents.
//!
//! This module provides the data model every search runs over: keyed
//! mappings, ordered sequences, and scalars (strings, numbers, booleans,
//! null). Mapping keys are always strings and keep their insertion order.
//!
//! # Example
//!
//! ```
//! use treesift::document::node::{Node, Number, Scalar};
//! use indexmap::IndexMap;
//!
//! let mut record = IndexMap::new();
//! record.insert("RecordType".to_string(), Node::string("CID"));
//! record.insert("RecordNumber".to_string(), Node::Scalar(Scalar::Number(Number::Integer(6))));
//! let root = Node::Mapping(record);
//!
//! assert!(root.is_container());
//! assert_eq!(root.len(), 2);
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::search::path::{Path, Segment};

/// Represents numbers (integer or float).
///
/// Equality is numeric: `Integer(6) == Float(6.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
}

/// A node in a searchable tree.
///
/// Containers own their children, so a whole document is a single `Node`.
/// Searches borrow the tree and never modify it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Ordered mapping of unique string keys to child nodes
    Mapping(IndexMap<String, Node>),
    /// Ordered list of child nodes
    Sequence(Vec<Node>),
    /// A leaf value
    Scalar(Scalar),
}

impl Node {
    /// Shorthand for a string scalar.
    pub fn string(s: impl Into<String>) -> Self {
        Node::Scalar(Scalar::String(s.into()))
    }

    /// Shorthand for an integer scalar.
    pub fn integer(i: i64) -> Self {
        Node::Scalar(Scalar::Number(Number::Integer(i)))
    }

    /// Shorthand for a float scalar.
    pub fn float(f: f64) -> Self {
        Node::Scalar(Scalar::Number(Number::Float(f)))
    }

    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    /// Builds a mapping holding exactly one entry.
    pub fn entry(key: impl Into<String>, value: Node) -> Self {
        let mut map = IndexMap::with_capacity(1);
        map.insert(key.into(), value);
        Node::Mapping(map)
    }

    /// Returns true if this node is a mapping or a sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use treesift::document::node::Node;
    ///
    /// assert!(Node::Sequence(vec![]).is_container());
    /// assert!(!Node::null().is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Mapping(_) | Node::Sequence(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Number of direct children. Scalars have none.
    pub fn len(&self) -> usize {
        match self {
            Node::Mapping(map) => map.len(),
            Node::Sequence(items) => items.len(),
            Node::Scalar(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Follows a path from this node.
    ///
    /// Key segments look up mapping entries and index segments look up
    /// sequence elements. Returns `None` as soon as a segment does not fit
    /// the node it is applied to.
    pub fn get(&self, path: &Path<'_>) -> Option<&Node> {
        let mut current = self;
        for segment in path.segments() {
            current = match (current, segment) {
                (Node::Mapping(map), Segment::Key(key)) => map.get(*key)?,
                (Node::Sequence(items), Segment::Index(idx)) => items.get(*idx)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Integer(i) => serializer.serialize_i64(*i),
            Number::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::Boolean(b) => serializer.serialize_bool(*b),
            Scalar::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Mapping(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Node::Sequence(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Node::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_across_representations() {
        assert_eq!(Number::Integer(6), Number::Float(6.0));
        assert_ne!(Number::Integer(6), Number::Float(6.5));
        assert_eq!(Node::integer(2526), Node::float(2526.0));
    }

    #[test]
    fn test_entry_builds_single_key_mapping() {
        let node = Node::entry("a", Node::null());
        match &node {
            Node::Mapping(map) => {
                assert_eq!(map.len(), 1);
                assert!(map["a"].is_null());
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_len_of_scalar_is_zero() {
        assert_eq!(Node::string("x").len(), 0);
        assert!(Node::string("x").is_empty());
    }

    #[test]
    fn test_serialize_preserves_key_order() {
        let mut map = IndexMap::new();
        map.insert("z".to_string(), Node::integer(1));
        map.insert("a".to_string(), Node::Sequence(vec![Node::null(), Node::float(1.5)]));
        let json = serde_json::to_string(&Node::Mapping(map)).unwrap();
        assert_eq!(json, r#"{"z":1,"a":[null,1.5]}"#);
    }
}
