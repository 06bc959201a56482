//! Loading of trees from disk or stdin.
//!
//! Searches only need a `Node`; this module is the usual way to get one
//! from JSON, JSONL, or YAML documents, optionally gzip-compressed.

pub mod loader;
