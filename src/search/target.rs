//! Target compilation and matching.
//!
//! A target describes what counts as a match. It is given as a `Node` and
//! compiled once into a `TargetKind`:
//!
//! | Target              | Kind            | Matches                               |
//! |---------------------|-----------------|---------------------------------------|
//! | `{"key": value}`    | `ExactPair`     | entries with that key and value       |
//! | `{"*": value}`      | `WildcardKey`   | entries with that value, any key      |
//! | `{"key": "*"}`      | `WildcardValue` | entries with that key, any value      |
//! | `"text"` or `6`     | `ScalarAny`     | any key or value equal to the scalar  |
//! | `null`              | `NullAny`       | any null value                        |
//!
//! In regex mode string parts of the target are patterns, anchored at the
//! start of the text they are matched against. Numbers are never patterns.

use regex::Regex;

use super::error::SearchError;
use super::numeric::Comparable;
use crate::document::node::{Node, Scalar};

/// Marker standing for "any key" or "any value" in a mapping target.
pub const WILDCARD: &str = "*";

/// A string compared literally or matched as a regex.
#[derive(Debug, Clone)]
pub enum TextPattern {
    Literal(String),
    Regex(Regex),
}

impl TextPattern {
    fn compile(text: &str, regex: bool) -> Result<Self, SearchError> {
        if regex {
            anchored(text).map(TextPattern::Regex)
        } else {
            Ok(TextPattern::Literal(text.to_string()))
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            TextPattern::Literal(literal) => literal == text,
            TextPattern::Regex(re) => re.is_match(text),
        }
    }
}

fn anchored(pattern: &str) -> Result<Regex, SearchError> {
    Regex::new(&format!("^(?:{})", pattern))
        .map_err(|e| SearchError::invalid_target(format!("bad pattern {:?}: {}", pattern, e)))
}

/// The value half of a mapping target.
#[derive(Debug, Clone)]
pub enum ValuePattern {
    /// Matches string values only
    Regex(Regex),
    /// Equality; numeric strings in the tree are normalized when enabled,
    /// the expected value is compared as given
    Equals(Node),
}

impl ValuePattern {
    fn compile(value: &Node, regex: bool) -> Result<Self, SearchError> {
        match value.as_str() {
            Some(text) if regex => anchored(text).map(ValuePattern::Regex),
            _ => Ok(ValuePattern::Equals(value.clone())),
        }
    }

    fn matches(&self, value: &Node, convert: bool) -> bool {
        match self {
            ValuePattern::Regex(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            ValuePattern::Equals(expected) => {
                Comparable::of(value, convert) == Comparable::of(expected, false)
            }
        }
    }
}

/// A bare scalar target.
#[derive(Debug, Clone)]
pub enum ScalarPattern {
    Text(TextPattern),
    Number(f64),
}

/// The closed set of target shapes.
#[derive(Debug, Clone)]
pub enum TargetKind {
    ExactPair { key: TextPattern, value: ValuePattern },
    WildcardKey { value: ValuePattern },
    WildcardValue { key: TextPattern },
    ScalarAny(ScalarPattern),
    NullAny,
}

/// A compiled target together with the comparison options it runs under.
#[derive(Debug, Clone)]
pub struct Target {
    kind: TargetKind,
    convert_numeric_strings: bool,
}

impl Target {
    /// Compiles `target` into a matcher.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidTarget` when the target is a sequence,
    /// a boolean, a mapping without exactly one entry, the `{"*": "*"}`
    /// mapping, or (in regex mode) holds a pattern that does not compile.
    pub fn compile(
        target: &Node,
        regex: bool,
        convert_numeric_strings: bool,
    ) -> Result<Self, SearchError> {
        let kind = match target {
            Node::Mapping(map) => {
                let (key, value) = match map.iter().next() {
                    Some(entry) if map.len() == 1 => entry,
                    _ => {
                        return Err(SearchError::invalid_target(format!(
                            "mapping target must have exactly one entry, found {}",
                            map.len()
                        )))
                    }
                };
                let wild_value = value.as_str() == Some(WILDCARD);
                match (key.as_str() == WILDCARD, wild_value) {
                    (true, true) => {
                        return Err(SearchError::invalid_target(
                            "key and value cannot both be wildcards",
                        ))
                    }
                    (true, false) => TargetKind::WildcardKey {
                        value: ValuePattern::compile(value, regex)?,
                    },
                    (false, true) => TargetKind::WildcardValue {
                        key: TextPattern::compile(key, regex)?,
                    },
                    (false, false) => TargetKind::ExactPair {
                        key: TextPattern::compile(key, regex)?,
                        value: ValuePattern::compile(value, regex)?,
                    },
                }
            }
            Node::Scalar(Scalar::String(text)) => {
                TargetKind::ScalarAny(ScalarPattern::Text(TextPattern::compile(text, regex)?))
            }
            Node::Scalar(Scalar::Number(n)) => {
                TargetKind::ScalarAny(ScalarPattern::Number(n.as_f64()))
            }
            Node::Scalar(Scalar::Null) => TargetKind::NullAny,
            Node::Scalar(Scalar::Boolean(_)) => {
                return Err(SearchError::invalid_target("boolean targets are not supported"))
            }
            Node::Sequence(_) => {
                return Err(SearchError::invalid_target("sequence targets are not supported"))
            }
        };

        tracing::debug!(?kind, regex, convert_numeric_strings, "target compiled");

        Ok(Target {
            kind,
            convert_numeric_strings,
        })
    }

    pub fn kind(&self) -> &TargetKind {
        &self.kind
    }

    /// True for the three mapping-shaped targets.
    pub fn is_mapping(&self) -> bool {
        matches!(
            self.kind,
            TargetKind::ExactPair { .. } | TargetKind::WildcardKey { .. } | TargetKind::WildcardValue { .. }
        )
    }

    /// Tests a mapping entry.
    pub fn matches_entry(&self, key: &str, value: &Node) -> bool {
        let convert = self.convert_numeric_strings;
        match &self.kind {
            TargetKind::ExactPair { key: k, value: v } => k.matches(key) && v.matches(value, convert),
            TargetKind::WildcardKey { value: v } => v.matches(value, convert),
            TargetKind::WildcardValue { key: k } => k.matches(key),
            TargetKind::ScalarAny(ScalarPattern::Text(pattern)) => {
                pattern.matches(key) || value.as_str().is_some_and(|s| pattern.matches(s))
            }
            TargetKind::ScalarAny(ScalarPattern::Number(n)) => {
                Comparable::of_key(key, convert) == Some(*n)
                    || Comparable::of(value, convert) == Comparable::Number(*n)
            }
            TargetKind::NullAny => value.is_null(),
        }
    }

    /// Tests a scalar element of a sequence. Mapping targets never match
    /// bare elements.
    pub fn matches_element(&self, element: &Node) -> bool {
        match &self.kind {
            TargetKind::ScalarAny(ScalarPattern::Text(pattern)) => {
                element.as_str().is_some_and(|s| pattern.matches(s))
            }
            TargetKind::ScalarAny(ScalarPattern::Number(n)) => {
                Comparable::of(element, self.convert_numeric_strings) == Comparable::Number(*n)
            }
            TargetKind::NullAny => element.is_null(),
            _ => false,
        }
    }
}
