//! Pruning of empty entries from trees.

use super::node::Node;

/// Returns a copy of `node` without null or empty-sequence mapping entries.
///
/// The removal recurses through nested mappings and through mappings held
/// inside sequences. Sequence elements themselves are never removed, so
/// `[1, null]` stays as it is.
///
/// # Example
///
/// ```
/// use treesift::document::cleanup::remove_empty;
/// use treesift::document::node::Node;
///
/// let node: Node = serde_json::json!({"a": null, "b": [], "c": {"d": null, "e": 1}}).into();
/// let pruned: Node = serde_json::json!({"c": {"e": 1}}).into();
/// assert_eq!(remove_empty(&node), pruned);
/// ```
pub fn remove_empty(node: &Node) -> Node {
    match node {
        Node::Mapping(map) => Node::Mapping(
            map.iter()
                .filter(|(_, value)| !is_empty_value(value))
                .map(|(key, value)| (key.clone(), remove_empty(value)))
                .collect(),
        ),
        Node::Sequence(items) => Node::Sequence(
            items
                .iter()
                .map(|item| match item {
                    Node::Mapping(_) => remove_empty(item),
                    other => other.clone(),
                })
                .collect(),
        ),
        Node::Scalar(_) => node.clone(),
    }
}

fn is_empty_value(value: &Node) -> bool {
    match value {
        Node::Sequence(items) => items.is_empty(),
        other => other.is_null(),
    }
}
