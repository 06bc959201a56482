//! Conversion of JSON, YAML, and serializable Rust values into `Node` trees.
//!
//! Every conversion produces a tree that satisfies the search input
//! contract: string keys only, no cycles, and only string, number,
//! boolean, and null leaves.
//!
//! # Example
//!
//! ```
//! use treesift::document::parser::parse_json;
//!
//! let json = r#"{"name": "Alice", "age": 30}"#;
//! let root = parse_json(json).unwrap();
//! assert_eq!(root.len(), 2);
//! ```

use super::node::{Node, Number, Scalar};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Parses a JSON string into a `Node`.
pub fn parse_json(content: &str) -> Result<Node> {
    let value: JsonValue = serde_json::from_str(content).context("Invalid JSON")?;
    Ok(parse_json_value(&value))
}

/// Converts a `serde_json::Value` into a `Node`.
pub fn parse_json_value(value: &JsonValue) -> Node {
    match value {
        JsonValue::Null => Node::Scalar(Scalar::Null),
        JsonValue::Bool(b) => Node::Scalar(Scalar::Boolean(*b)),
        JsonValue::Number(n) => Node::Scalar(Scalar::Number(json_number(n))),
        JsonValue::String(s) => Node::Scalar(Scalar::String(s.clone())),
        JsonValue::Array(items) => Node::Sequence(items.iter().map(parse_json_value).collect()),
        JsonValue::Object(fields) => Node::Mapping(
            fields
                .iter()
                .map(|(key, child)| (key.clone(), parse_json_value(child)))
                .collect(),
        ),
    }
}

fn json_number(n: &serde_json::Number) -> Number {
    match n.as_i64() {
        Some(i) => Number::Integer(i),
        // u64 beyond i64::MAX and all floats land here
        None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

impl From<JsonValue> for Node {
    fn from(value: JsonValue) -> Self {
        parse_json_value(&value)
    }
}

/// Parses a YAML string into a `Node`.
///
/// A stream holding several documents becomes a sequence with one element
/// per document. An empty stream parses to null.
pub fn parse_yaml(content: &str) -> Result<Node> {
    let mut documents = Vec::new();
    for (idx, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = YamlValue::deserialize(document)
            .with_context(|| format!("Invalid YAML in document {}", idx + 1))?;
        documents.push(parse_yaml_value(&value));
    }

    Ok(match documents.len() {
        0 => Node::null(),
        1 => documents.remove(0),
        _ => Node::Sequence(documents),
    })
}

/// Converts a `serde_yaml::Value` into a `Node`.
///
/// Non-string mapping keys are rendered to their YAML text, and tags are
/// dropped in favour of the tagged value.
pub fn parse_yaml_value(value: &YamlValue) -> Node {
    match value {
        YamlValue::Null => Node::Scalar(Scalar::Null),
        YamlValue::Bool(b) => Node::Scalar(Scalar::Boolean(*b)),
        YamlValue::Number(n) => Node::Scalar(Scalar::Number(yaml_number(n))),
        YamlValue::String(s) => Node::Scalar(Scalar::String(s.clone())),
        YamlValue::Sequence(items) => Node::Sequence(items.iter().map(parse_yaml_value).collect()),
        YamlValue::Mapping(fields) => {
            let mut map = IndexMap::with_capacity(fields.len());
            for (key, child) in fields {
                map.insert(yaml_key(key), parse_yaml_value(child));
            }
            Node::Mapping(map)
        }
        YamlValue::Tagged(tagged) => parse_yaml_value(&tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Number {
    match n.as_i64() {
        Some(i) => Number::Integer(i),
        None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn yaml_key(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        YamlValue::Tagged(tagged) => yaml_key(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Flattens any serializable value into a `Node`.
///
/// Structs become mappings keyed by field name, `Vec`s and tuples become
/// sequences, and `Option::None` becomes null.
///
/// # Example
///
/// ```
/// use serde::Serialize;
/// use treesift::document::parser::to_node;
///
/// #[derive(Serialize)]
/// struct Example {
///     number: u32,
///     list: Vec<u32>,
/// }
///
/// let node = to_node(&Example { number: 12, list: vec![1, 2] }).unwrap();
/// assert_eq!(node.len(), 2);
/// ```
pub fn to_node<T: Serialize + ?Sized>(value: &T) -> Result<Node> {
    let value = serde_json::to_value(value).context("Value cannot be represented as a tree")?;
    Ok(parse_json_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_keeps_key_order() {
        let root = parse_json(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        match root {
            Node::Mapping(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["b", "a", "c"]);
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_parse_json_numbers() {
        let root = parse_json("[1, 2.5, -3]").unwrap();
        assert_eq!(
            root,
            Node::Sequence(vec![Node::integer(1), Node::float(2.5), Node::integer(-3)])
        );
    }

    #[test]
    fn test_parse_json_invalid() {
        let err = parse_json("{invalid}").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_parse_yaml_mapping() {
        let root = parse_yaml("name: HID\ncount: 4\nflag: true\nnothing: ~\n").unwrap();
        let expected: Node = serde_json::json!({
            "name": "HID",
            "count": 4,
            "flag": true,
            "nothing": null
        })
        .into();
        assert_eq!(root, expected);
    }

    #[test]
    fn test_parse_yaml_non_string_keys() {
        let root = parse_yaml("1: one\ntrue: yes\n").unwrap();
        match root {
            Node::Mapping(map) => {
                assert_eq!(map["1"], Node::string("one"));
                assert!(map.contains_key("true"));
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_parse_yaml_multi_document() {
        let root = parse_yaml("a: 1\n---\nb: 2\n").unwrap();
        match root {
            Node::Sequence(docs) => assert_eq!(docs.len(), 2),
            _ => panic!("Expected one sequence element per document"),
        }
    }

    #[test]
    fn test_to_node_struct() {
        #[derive(Serialize)]
        struct Example {
            number: u32,
            list_dict: Vec<Option<String>>,
            nnone: Option<u8>,
        }

        let node = to_node(&Example {
            number: 12,
            list_dict: vec![Some("lots".to_string()), None],
            nnone: None,
        })
        .unwrap();

        let expected: Node = serde_json::json!({
            "number": 12,
            "list_dict": ["lots", null],
            "nnone": null
        })
        .into();
        assert_eq!(node, expected);
    }
}
