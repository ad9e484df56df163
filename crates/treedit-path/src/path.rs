//! Ordered sequences of steps identifying a location in a container graph.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Step;

/// Error returned when parsing a pointer string into a [`Path`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    #[error("pointer must be empty or start with '/'")]
    MissingLeadingSlash,
}

/// An ordered sequence of [`Step`]s; the empty path denotes the root.
///
/// Paths are cheap to clone, hashable (so they can key a map), and
/// round-trip through pointer strings via [`FromStr`] and
/// [`Path::to_pointer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<Step>);

impl Path {
    /// The empty path, denoting the container root.
    pub fn root() -> Path {
        Path(Vec::new())
    }

    pub fn new(steps: Vec<Step>) -> Path {
        Path(steps)
    }

    /// Parse a pointer string.
    ///
    /// The empty string is the root path; otherwise the pointer must
    /// start with `/` and each component parses per
    /// [`Step::parse_component`].
    pub fn parse(pointer: &str) -> Result<Path, PathParseError> {
        pointer.parse()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    /// Split into the parent steps and the final step.
    ///
    /// Returns `None` for the root path.
    pub fn split_last(&self) -> Option<(&[Step], &Step)> {
        self.0.split_last().map(|(last, parent)| (parent, last))
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        self.split_last().map(|(parent, _)| Path(parent.to_vec()))
    }

    /// Extend this path with one more step, returning the child path.
    pub fn child(&self, step: impl Into<Step>) -> Path {
        let mut steps = self.0.clone();
        steps.push(step.into());
        Path(steps)
    }

    pub fn push(&mut self, step: impl Into<Step>) {
        self.0.push(step.into());
    }

    /// True if `self` is a proper structural prefix of `other`.
    ///
    /// The comparison is over raw steps; `FromEnd` markers are not
    /// resolved, so `Index(2)` and `FromEnd(0)` never match even when
    /// they would address the same element.
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        self.0.len() < other.0.len() && other.0[..self.0.len()] == self.0[..]
    }

    /// Format as a pointer string; the root path is the empty string.
    pub fn to_pointer(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        for step in &self.0 {
            out.push('/');
            out.push_str(&step.to_component());
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pointer())
    }
}

impl FromStr for Path {
    type Err = PathParseError;

    fn from_str(pointer: &str) -> Result<Path, PathParseError> {
        if pointer.is_empty() {
            return Ok(Path::root());
        }
        if !pointer.starts_with('/') {
            return Err(PathParseError::MissingLeadingSlash);
        }
        Ok(Path(
            pointer[1..].split('/').map(Step::parse_component).collect(),
        ))
    }
}

impl From<Vec<Step>> for Path {
    fn from(steps: Vec<Step>) -> Path {
        Path(steps)
    }
}

impl FromIterator<Step> for Path {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Path {
        Path(iter.into_iter().collect())
    }
}

impl IntoIterator for Path {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
