//! Error types for search construction.

use thiserror::Error;

/// Errors that can occur while building a search.
///
/// Every failure is detected before the traversal starts, so a search that
/// fails to build has no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The target is not a single-entry mapping, string, number, or null,
    /// or it is a mapping whose key and value are both the wildcard.
    #[error("Invalid target: {reason}")]
    InvalidTarget { reason: String },
}

impl SearchError {
    pub(crate) fn invalid_target(reason: impl Into<String>) -> Self {
        SearchError::InvalidTarget {
            reason: reason.into(),
        }
    }
}
