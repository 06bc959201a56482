//! Tests for building searchable trees from Rust values.

use serde::Serialize;
use treesift::document::cleanup::remove_empty;
use treesift::document::node::Node;
use treesift::document::parser::to_node;
use treesift::search::{Path, Search, Segment};

#[derive(Serialize)]
struct Animal {
    fish: Option<u32>,
    pig: Option<String>,
}

#[derive(Serialize)]
struct Example {
    number: u32,
    llist: Vec<u32>,
    llist2: Vec<u32>,
    list_dict: Vec<serde_json::Value>,
    nnone: Option<u32>,
    animal: Animal,
}

fn example() -> Example {
    Example {
        number: 12,
        llist: vec![123, 213, 123],
        llist2: vec![],
        list_dict: vec![
            serde_json::json!({"fish": 2}),
            serde_json::json!({"pig": "lots"}),
            serde_json::json!({"cows": null}),
        ],
        nnone: None,
        animal: Animal {
            fish: Some(2),
            pig: None,
        },
    }
}

fn null_paths(root: &Node) -> Vec<String> {
    Search::with_defaults(root, &Node::null())
        .unwrap()
        .matches()
        .iter()
        .map(|m| m.path.to_string())
        .collect()
}

#[test]
fn test_serialized_struct_is_a_mapping() {
    let root = to_node(&example()).unwrap();
    assert!(matches!(root, Node::Mapping(_)));
    assert_eq!(root.len(), 6);
}

#[test]
fn test_null_search_over_serialized_struct() {
    let root = to_node(&example()).unwrap();
    assert_eq!(null_paths(&root), vec!["nnone", "animal.pig", "list_dict.2.cows"]);
}

#[test]
fn test_remove_empty_leaves_nothing_to_find() {
    let root = remove_empty(&to_node(&example()).unwrap());
    assert!(null_paths(&root).is_empty());
    match &root {
        Node::Mapping(map) => assert!(!map.contains_key("llist2")),
        _ => panic!("Expected mapping"),
    }
}

#[test]
fn test_number_search_over_serialized_struct() {
    let root = to_node(&example()).unwrap();
    let search = Search::with_defaults(&root, &Node::integer(123)).unwrap();
    let paths: Vec<String> = search.matches().iter().map(|m| m.path.to_string()).collect();
    assert_eq!(paths, vec!["llist", "llist"]);
}

#[test]
fn test_get_follows_mixed_paths() {
    let root = to_node(&example()).unwrap();
    let path = Path::new(vec![Segment::Key("list_dict"), Segment::Index(1), Segment::Key("pig")]);
    assert_eq!(root.get(&path), Some(&Node::string("lots")));

    let wrong = Path::new(vec![Segment::Index(0)]);
    assert_eq!(root.get(&wrong), None);
}
