use serde::ser::{Serialize, SerializeMap, SerializeTuple, Serializer};

use super::error::SearchError;
use super::path::{Path, Segment};
use super::target::Target;
use crate::document::node::Node;

/// Borrowed view of the data reported for a match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection<'a> {
    /// A single `{key: value}` mapping entry
    Entry { key: &'a str, value: &'a Node },
    /// A node of the tree
    Value(&'a Node),
}

impl Projection<'_> {
    /// Copies the projection out of the tree.
    pub fn to_node(&self) -> Node {
        match self {
            Projection::Entry { key, value } => Node::entry(*key, (*value).clone()),
            Projection::Value(node) => (*node).clone(),
        }
    }
}

impl Serialize for Projection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Projection::Entry { key, value } => {
                let mut state = serializer.serialize_map(Some(1))?;
                state.serialize_entry(key, value)?;
                state.end()
            }
            Projection::Value(node) => node.serialize(serializer),
        }
    }
}

/// Decides what a match reports, given the container holding the match
/// and the matched entry or element.
pub type ProjectFn = for<'a> fn(&'a Node, Projection<'a>) -> Projection<'a>;

/// Reports the matched entry itself.
pub fn project_current<'a>(_container: &'a Node, matched: Projection<'a>) -> Projection<'a> {
    matched
}

/// Reports the mapping or sequence that holds the match.
pub fn project_parent<'a>(container: &'a Node, _matched: Projection<'a>) -> Projection<'a> {
    Projection::Value(container)
}

/// A single search result.
///
/// Scalar elements matched directly inside the root sequence have an empty
/// path; every other match has at least one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub path: Path<'a>,
    pub projection: Projection<'a>,
}

impl Serialize for Match<'_> {
    /// Serializes as `[path, projection]`, or as the bare projection when
    /// the path is empty.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.path.is_empty() {
            return self.projection.serialize(serializer);
        }
        let mut state = serializer.serialize_tuple(2)?;
        state.serialize_element(&self.path.to_string())?;
        state.serialize_element(&self.projection)?;
        state.end()
    }
}

/// Options controlling a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Treat string parts of the target as regex patterns
    pub regex: bool,
    /// Compare numeric strings as numbers (ignored in regex mode)
    pub convert_numeric_strings: bool,
    /// Order results by depth, then by last path segment
    pub sort_results: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            regex: false,
            convert_numeric_strings: true,
            sort_results: true,
        }
    }
}

impl SearchOptions {
    pub fn regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }

    pub fn convert_numeric_strings(mut self, convert: bool) -> Self {
        self.convert_numeric_strings = convert;
        self
    }

    pub fn sort_results(mut self, sort: bool) -> Self {
        self.sort_results = sort;
        self
    }
}

/// A completed search over a borrowed tree.
///
/// The traversal runs once, inside [`Search::new`].
///
/// # Example
///
/// ```
/// use treesift::document::node::Node;
/// use treesift::search::{project_current, Search, SearchOptions};
///
/// let tree: Node = serde_json::json!({"Record": {"RecordType": "CID", "RecordNumber": 6}}).into();
/// let target: Node = serde_json::json!({"RecordType": "CID"}).into();
///
/// let search = Search::new(&tree, &target, project_current, SearchOptions::default()).unwrap();
/// assert_eq!(search.len(), 1);
/// assert_eq!(search.matches()[0].path.to_string(), "Record.RecordType");
/// ```
#[derive(Debug, Clone)]
pub struct Search<'a> {
    matches: Vec<Match<'a>>,
}

impl<'a> Search<'a> {
    /// Validates `target` and searches `root` for it.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidTarget` before any traversal when the
    /// target has an unsupported shape.
    pub fn new(
        root: &'a Node,
        target: &Node,
        project: ProjectFn,
        options: SearchOptions,
    ) -> Result<Self, SearchError> {
        let convert = options.convert_numeric_strings && !options.regex;
        let target = Target::compile(target, options.regex, convert)?;

        let mut walker = Walker {
            target: &target,
            project,
            path: Vec::new(),
            matches: Vec::new(),
        };
        walker.extract(root);
        let mut matches = walker.matches;

        if options.sort_results {
            // sort_by_cached_key is stable
            matches.sort_by_cached_key(|m| (m.path.dots(), m.path.last_segment()));
        }

        tracing::debug!(
            matches = matches.len(),
            sorted = options.sort_results,
            "search complete"
        );

        Ok(Search { matches })
    }

    /// Searches with the default projection and options.
    pub fn with_defaults(root: &'a Node, target: &Node) -> Result<Self, SearchError> {
        Self::new(root, target, project_current, SearchOptions::default())
    }

    pub fn matches(&self) -> &[Match<'a>] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<Match<'a>> {
        self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Depth-first traversal state. `path` holds the segments leading to the
/// node currently being visited.
struct Walker<'t, 'a> {
    target: &'t Target,
    project: ProjectFn,
    path: Vec<Segment<'a>>,
    matches: Vec<Match<'a>>,
}

impl<'a> Walker<'_, 'a> {
    fn extract(&mut self, node: &'a Node) {
        match node {
            Node::Mapping(map) => {
                for (key, value) in map {
                    let key = key.as_str();
                    if self.target.matches_entry(key, value) {
                        self.path.push(Segment::Key(key));
                        self.emit(node, Projection::Entry { key, value });
                        self.path.pop();
                    } else if value.is_container() {
                        self.path.push(Segment::Key(key));
                        self.extract(value);
                        self.path.pop();
                    }
                }
            }
            Node::Sequence(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if item.is_container() {
                        self.path.push(Segment::Index(idx));
                        self.extract(item);
                        self.path.pop();
                    } else if !self.target.is_mapping() && self.target.matches_element(item) {
                        // the element index is not part of the path
                        self.emit(node, Projection::Value(item));
                    }
                }
            }
            Node::Scalar(_) => {}
        }
    }

    fn emit(&mut self, container: &'a Node, matched: Projection<'a>) {
        let projection = (self.project)(container, matched);
        self.matches.push(Match {
            path: Path::from(self.path.as_slice()),
            projection,
        });
    }
}
