//! Numeric-string normalization.
//!
//! Trees decoded from loosely typed sources often carry numbers as text
//! (`"6"`, `"2 526"`). When normalization is enabled these strings compare
//! equal to the number they spell.

use crate::document::node::{Node, Scalar};

/// Parses `s` as a float after removing every space character.
///
/// Returns `None` when the compacted text is not a number.
///
/// # Example
///
/// ```
/// use treesift::search::numeric::parse_numeric_str;
///
/// assert_eq!(parse_numeric_str("6 "), Some(6.0));
/// assert_eq!(parse_numeric_str("2 526"), Some(2526.0));
/// assert_eq!(parse_numeric_str("CID"), None);
/// ```
pub fn parse_numeric_str(s: &str) -> Option<f64> {
    let compact: String = s.chars().filter(|c| *c != ' ').collect();
    compact.trim().parse::<f64>().ok()
}

/// A node viewed for equality checks.
#[derive(Debug, Clone, Copy)]
pub enum Comparable<'a> {
    Number(f64),
    Other(&'a Node),
}

impl<'a> Comparable<'a> {
    /// Views `node` as a number when it is one, or when it is a numeric
    /// string and `convert_strings` is set.
    pub fn of(node: &'a Node, convert_strings: bool) -> Self {
        match node {
            Node::Scalar(Scalar::Number(n)) => Comparable::Number(n.as_f64()),
            Node::Scalar(Scalar::String(s)) if convert_strings => match parse_numeric_str(s) {
                Some(f) => Comparable::Number(f),
                None => Comparable::Other(node),
            },
            _ => Comparable::Other(node),
        }
    }

    /// Views a mapping key the same way as a string value.
    pub fn of_key(key: &str, convert_strings: bool) -> Option<f64> {
        if convert_strings {
            parse_numeric_str(key)
        } else {
            None
        }
    }
}

impl PartialEq for Comparable<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::Other(a), Comparable::Other(b)) => a == b,
            _ => false,
        }
    }
}
