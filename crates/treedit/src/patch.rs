//! Transactional application of ordered operation batches.
//!
//! A patch is applied strictly in order against one working container.
//! The copying form takes a single deep clone up front and hands it
//! back only when every operation succeeded, so the caller's container
//! is guaranteed untouched on failure. No per-operation undo log is
//! kept.

use serde_json::Value;
use thiserror::Error;
use treedit_path::Path;

use crate::error::Error as PathError;
use crate::{access, edit};

/// One structural edit within a patch, RFC 6902 style.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
    Move { path: Path, from: Path },
    Copy { path: Path, from: Path },
    Test { path: Path, value: Value },
}

impl Operation {
    /// The operation's wire name.
    pub fn op_name(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "add",
            Operation::Remove { .. } => "remove",
            Operation::Replace { .. } => "replace",
            Operation::Move { .. } => "move",
            Operation::Copy { .. } => "copy",
            Operation::Test { .. } => "test",
        }
    }

    /// The operation's target path.
    pub fn path(&self) -> &Path {
        match self {
            Operation::Add { path, .. }
            | Operation::Remove { path }
            | Operation::Replace { path, .. }
            | Operation::Move { path, .. }
            | Operation::Copy { path, .. }
            | Operation::Test { path, .. } => path,
        }
    }
}

/// Why a single operation failed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchFailure {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("value at {path} does not equal the expected value")]
    Test { path: Path },
}

/// A patch aborted at `index`; no later operation was executed.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("patch operation {index} ({op}) failed: {source}")]
pub struct PatchError {
    pub index: usize,
    pub op: &'static str,
    #[source]
    pub source: PatchFailure,
}

fn apply_op(doc: &mut Value, op: &Operation) -> Result<(), PatchFailure> {
    match op {
        Operation::Add { path, value } => edit::add_mut(doc, path, value.clone())?,
        Operation::Remove { path } => {
            edit::remove_mut(doc, path)?;
        }
        Operation::Replace { path, value } => edit::replace_mut(doc, path, value.clone())?,
        Operation::Move { path, from } => edit::move_mut(doc, from, path)?,
        Operation::Copy { path, from } => edit::copy_mut(doc, from, path)?,
        Operation::Test { path, value } => {
            // Deep structural equality, not reference identity
            let actual = access::get(doc, path)?;
            if actual != value {
                return Err(PatchFailure::Test { path: path.clone() });
            }
        }
    }
    Ok(())
}

/// Apply `ops` in order against the caller's container.
///
/// On failure, mutations up to the failing operation remain applied;
/// this is the documented in-place trade-off. Use [`patch`] for
/// all-or-nothing semantics.
pub fn patch_mut(doc: &mut Value, ops: &[Operation]) -> Result<(), PatchError> {
    for (index, op) in ops.iter().enumerate() {
        apply_op(doc, op).map_err(|source| PatchError {
            index,
            op: op.op_name(),
            source,
        })?;
    }
    Ok(())
}

/// Apply `ops` in order against a private copy, returning it only if
/// every operation succeeded. The original is untouched on failure.
pub fn patch(doc: &Value, ops: &[Operation]) -> Result<Value, PatchError> {
    let mut working = doc.clone();
    patch_mut(&mut working, ops)?;
    Ok(working)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(pointer: &str) -> Path {
        pointer.parse().unwrap()
    }

    #[test]
    fn applies_in_order() {
        let doc = json!({"a": 1});
        let ops = vec![
            Operation::Add {
                path: p("/b"),
                value: json!([]),
            },
            Operation::Add {
                path: p("/b/0"),
                value: json!("x"),
            },
            Operation::Replace {
                path: p("/a"),
                value: json!(2),
            },
        ];
        assert_eq!(
            patch(&doc, &ops).unwrap(),
            json!({"a": 2, "b": ["x"]})
        );
    }

    #[test]
    fn test_op_checks_deep_equality() {
        let doc = json!({"a": {"b": [1, 2]}});
        let ok = vec![Operation::Test {
            path: p("/a"),
            value: json!({"b": [1, 2]}),
        }];
        assert_eq!(patch(&doc, &ok).unwrap(), doc);

        let bad = vec![Operation::Test {
            path: p("/a"),
            value: json!({"b": [1]}),
        }];
        let err = patch(&doc, &bad).unwrap_err();
        assert_eq!(err.index, 0);
        assert_eq!(err.op, "test");
        assert_eq!(err.source, PatchFailure::Test { path: p("/a") });
    }

    #[test]
    fn aborts_at_first_failure() {
        let doc = json!({"a": 1});
        let ops = vec![
            Operation::Remove { path: p("/missing") },
            // Never reached
            Operation::Remove { path: p("/a") },
        ];
        let err = patch(&doc, &ops).unwrap_err();
        assert_eq!(err.index, 0);
        assert_eq!(err.op, "remove");
    }

    #[test]
    fn copy_is_untouched_on_failure() {
        let doc = json!({"a": {"b": {"c": "x"}}});
        let ops = vec![
            Operation::Replace {
                path: p("/a/b/c"),
                value: json!(42),
            },
            Operation::Test {
                path: p("/a/b/c"),
                value: json!("C"),
            },
        ];
        let err = patch(&doc, &ops).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(doc, json!({"a": {"b": {"c": "x"}}}));
    }

    #[test]
    fn in_place_keeps_partial_mutations() {
        let mut doc = json!({"a": 1});
        let ops = vec![
            Operation::Add {
                path: p("/b"),
                value: json!(2),
            },
            Operation::Remove { path: p("/missing") },
        ];
        assert!(patch_mut(&mut doc, &ops).is_err());
        // The first op's effect remains; documented in-place behavior
        assert_eq!(doc, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn move_and_copy_dispatch() {
        let doc = json!({"a": 1});
        let ops = vec![
            Operation::Copy {
                path: p("/b"),
                from: p("/a"),
            },
            Operation::Move {
                path: p("/c"),
                from: p("/a"),
            },
        ];
        assert_eq!(patch(&doc, &ops).unwrap(), json!({"b": 1, "c": 1}));
    }
}
