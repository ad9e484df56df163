//! Error taxonomy for path resolution and structural edits.

use thiserror::Error;
use treedit_path::Path;

/// Failure of a resolution, accessor, or editor call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A key step did not match any entry of the mapping it was applied to.
    #[error("key not found: {key:?}")]
    KeyNotFound { key: String },

    /// An index step fell outside the sequence it was applied to.
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A step's kind is incompatible with the container kind encountered
    /// (key step against a sequence, index step against a mapping).
    #[error("step kind does not match container kind")]
    TypeMismatch,

    /// Attempted to descend through a scalar value.
    #[error("cannot descend through a non-container value")]
    NotAContainer,

    /// The target path does not resolve to an existing value.
    #[error("path not found: {path}")]
    PathNotFound { path: Path },

    /// The immediate container of the final path step does not exist.
    #[error("parent container not found for: {path}")]
    ParentNotFound { path: Path },

    /// Key or pair access requested at the root path, where key
    /// semantics are undefined.
    #[error("key access at the root path")]
    RootKeyOperation,

    /// `move`/`copy` where `from` is a proper prefix of the destination.
    #[error("cannot move or copy a value into its own descendant")]
    InvalidMoveTarget,
}

impl Error {
    /// Collapse lookup-level misses into `PathNotFound` for the given
    /// path. Shape errors (`TypeMismatch`, `NotAContainer`) pass through
    /// untouched so the taxonomy stays precise.
    pub(crate) fn into_not_found(self, path: &Path) -> Error {
        match self {
            Error::KeyNotFound { .. } | Error::IndexOutOfBounds { .. } => Error::PathNotFound {
                path: path.clone(),
            },
            other => other,
        }
    }

    /// Same collapse, but into `ParentNotFound` (the `add` contract).
    pub(crate) fn into_parent_not_found(self, path: &Path) -> Error {
        match self {
            Error::KeyNotFound { .. }
            | Error::IndexOutOfBounds { .. }
            | Error::PathNotFound { .. } => Error::ParentNotFound {
                path: path.clone(),
            },
            other => other,
        }
    }
}
