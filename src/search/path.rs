//! Paths from a tree root to a match.

use std::fmt;

/// One step of a path: a mapping key or a sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// An immutable path, rendered by joining its segments with `.`.
///
/// Keys are borrowed from the searched tree, so a path never outlives it.
///
/// # Example
///
/// ```
/// use treesift::search::path::{Path, Segment};
///
/// let path = Path::new(vec![Segment::Key("a"), Segment::Index(0), Segment::Key("x")]);
/// assert_eq!(path.to_string(), "a.0.x");
/// assert_eq!(path.dots(), 2);
/// assert_eq!(path.last_segment(), "x");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Path<'a> {
    pub fn new(segments: Vec<Segment<'a>>) -> Self {
        Path { segments }
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of `.` characters in the rendered path.
    ///
    /// Keys that contain dots themselves count too.
    pub fn dots(&self) -> usize {
        let separators = self.segments.len().saturating_sub(1);
        let embedded: usize = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Key(key) => key.matches('.').count(),
                Segment::Index(_) => 0,
            })
            .sum();
        separators + embedded
    }

    /// Text after the last `.` of the rendered path.
    pub fn last_segment(&self) -> String {
        match self.segments.last() {
            Some(Segment::Key(key)) => key.rsplit('.').next().unwrap_or(*key).to_string(),
            Some(Segment::Index(idx)) => idx.to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl<'a> From<&[Segment<'a>]> for Path<'a> {
    fn from(segments: &[Segment<'a>]) -> Self {
        Path::new(segments.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path() {
        let path = Path::default();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "");
        assert_eq!(path.dots(), 0);
        assert_eq!(path.last_segment(), "");
    }

    #[test]
    fn test_dotted_keys_count_as_separators() {
        let path = Path::new(vec![Segment::Key("a.b"), Segment::Key("c.d")]);
        assert_eq!(path.to_string(), "a.b.c.d");
        assert_eq!(path.dots(), 3);
        assert_eq!(path.last_segment(), "d");
    }

    #[test]
    fn test_index_last_segment() {
        let path = Path::new(vec![Segment::Key("testing"), Segment::Index(1)]);
        assert_eq!(path.to_string(), "testing.1");
        assert_eq!(path.last_segment(), "1");
    }
}
