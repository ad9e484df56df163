//! A single navigation unit within a path.

use std::fmt;

use crate::{escape_component, is_valid_index, unescape_component};

/// One step of a [`Path`](crate::Path).
///
/// `FromEnd(0)` denotes the last element of a sequence, `FromEnd(1)` the
/// second-to-last, and so on. From-end steps are only meaningful against
/// sequences and are resolved to an absolute index at the point the
/// enclosing sequence's length is known, never earlier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// A mapping key.
    Key(String),
    /// An absolute sequence index.
    Index(usize),
    /// A sequence index counted from the end.
    FromEnd(usize),
}

impl Step {
    pub fn key(key: impl Into<String>) -> Step {
        Step::Key(key.into())
    }

    pub fn index(index: usize) -> Step {
        Step::Index(index)
    }

    pub fn from_end(offset: usize) -> Step {
        Step::FromEnd(offset)
    }

    /// Parse a single pointer component.
    ///
    /// `-` and `last` parse as `FromEnd(0)`, `last-N` as `FromEnd(N)`,
    /// decimal digits (without leading zeros) as `Index`, and anything
    /// else as an unescaped `Key`. Keys that collide with the reserved
    /// spellings (`-`, `last`, `last-N`, bare digits) cannot be written
    /// as pointer components; construct them with [`Step::key`] instead.
    pub fn parse_component(component: &str) -> Step {
        if component == "-" || component == "last" {
            return Step::FromEnd(0);
        }
        if let Some(rest) = component.strip_prefix("last-") {
            if is_valid_index(rest) {
                if let Ok(offset) = rest.parse() {
                    return Step::FromEnd(offset);
                }
            }
        }
        if is_valid_index(component) {
            if let Ok(index) = component.parse() {
                return Step::Index(index);
            }
        }
        Step::Key(unescape_component(component))
    }

    /// Format this step as a pointer component.
    pub fn to_component(&self) -> String {
        match self {
            Step::Key(key) => escape_component(key),
            Step::Index(index) => index.to_string(),
            Step::FromEnd(0) => "-".to_string(),
            Step::FromEnd(offset) => format!("last-{offset}"),
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Step::Key(_))
    }

    /// True for both absolute and from-end indices.
    pub fn is_index(&self) -> bool {
        matches!(self, Step::Index(_) | Step::FromEnd(_))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_component())
    }
}

impl From<&str> for Step {
    fn from(key: &str) -> Step {
        Step::Key(key.to_string())
    }
}

impl From<String> for Step {
    fn from(key: String) -> Step {
        Step::Key(key)
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Step {
        Step::Index(index)
    }
}
