//! Treesift - recursive key/value search over JSON and YAML trees.
//!
//! Load or build a [`document::node::Node`], then run a
//! [`search::Search`] over it to get every matching entry with its dotted
//! path from the root.

pub mod config;
pub mod document;
pub mod file;
pub mod search;
