//! Recursive key/value search over document trees.
//!
//! A search walks a tree depth-first and reports every mapping entry (or
//! sequence element, for scalar and null targets) that matches a target,
//! together with the dotted path leading to it.
//!
//! # Target shapes
//!
//! - `{"key": value}` - exact key and value
//! - `{"*": value}` - any key with that value
//! - `{"key": "*"}` - that key with any value
//! - `"text"` or `6` - any key or value equal to the scalar
//! - `null` - any null value
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use treesift::document::node::Node;
//! use treesift::search::Search;
//!
//! let tree: Node = json!({"a": [{"x": 1}, {"x": 2}]}).into();
//! let search = Search::with_defaults(&tree, &json!({"x": "*"}).into()).unwrap();
//!
//! let paths: Vec<String> = search.matches().iter().map(|m| m.path.to_string()).collect();
//! assert_eq!(paths, vec!["a.0.x", "a.1.x"]);
//! ```

pub mod engine;
pub mod error;
pub mod numeric;
pub mod path;
pub mod target;

pub use engine::{
    project_current, project_parent, Match, ProjectFn, Projection, Search, SearchOptions,
};
pub use error::SearchError;
pub use path::{Path, Segment};
pub use target::{Target, TargetKind, WILDCARD};
