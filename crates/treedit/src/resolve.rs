//! Path resolution: fail-fast walks (`at`) and auto-vivifying walks
//! (`vivify`).
//!
//! `at` mirrors a plain dereference: it walks existing structure only
//! and fails on the first missing or mismatched step. `vivify` creates
//! missing intermediate containers as it goes, choosing the kind of
//! each created container by looking ahead at the step that will be
//! applied to it — index steps imply a sequence, key steps a mapping.
//! Vivification only ever fills in absent structure; an existing scalar
//! in the middle of a path is never overwritten.

use serde_json::Value;
use treedit_path::{Path, Step};

use crate::error::Error;

/// Resolve `step` against a sequence of length `len` to an absolute
/// index within `[0, len)`.
pub(crate) fn sequence_index(step: &Step, len: usize) -> Result<usize, Error> {
    match step {
        Step::Index(index) => {
            if *index < len {
                Ok(*index)
            } else {
                Err(Error::IndexOutOfBounds { index: *index, len })
            }
        }
        Step::FromEnd(offset) => len
            .checked_sub(1 + offset)
            .ok_or(Error::IndexOutOfBounds { index: *offset, len }),
        Step::Key(_) => Err(Error::TypeMismatch),
    }
}

/// The raw key a step denotes when applied to a mapping.
///
/// An existing mapping always wins over step-kind inference: an index
/// step against a mapping looks up its decimal spelling as a key, which
/// keeps pointers like `/a/0` meaningful against both container kinds.
/// From-end steps are only meaningful against sequences.
pub(crate) fn mapping_key(step: &Step) -> Result<String, Error> {
    match step {
        Step::Key(key) => Ok(key.clone()),
        Step::Index(index) => Ok(index.to_string()),
        Step::FromEnd(_) => Err(Error::TypeMismatch),
    }
}

fn descend<'a>(value: &'a Value, step: &Step) -> Result<&'a Value, Error> {
    match value {
        Value::Object(map) => {
            let key = mapping_key(step)?;
            map.get(&key).ok_or(Error::KeyNotFound { key })
        }
        Value::Array(seq) => {
            let index = sequence_index(step, seq.len())?;
            Ok(&seq[index])
        }
        _ => Err(Error::NotAContainer),
    }
}

fn descend_mut<'a>(value: &'a mut Value, step: &Step) -> Result<&'a mut Value, Error> {
    match value {
        Value::Object(map) => {
            let key = mapping_key(step)?;
            map.get_mut(&key).ok_or(Error::KeyNotFound { key })
        }
        Value::Array(seq) => {
            let index = sequence_index(step, seq.len())?;
            Ok(&mut seq[index])
        }
        _ => Err(Error::NotAContainer),
    }
}

/// The empty container implied by the step that will be applied next.
///
/// A trailing missing step (no lookahead) defaults to a mapping.
fn implied_container(next: Option<&Step>) -> Value {
    match next {
        Some(Step::Index(_)) | Some(Step::FromEnd(_)) => Value::Array(Vec::new()),
        _ => Value::Object(serde_json::Map::new()),
    }
}

fn descend_or_create<'a>(
    value: &'a mut Value,
    step: &Step,
    next: Option<&Step>,
) -> Result<&'a mut Value, Error> {
    match value {
        Value::Object(map) => {
            let key = mapping_key(step)?;
            Ok(map.entry(key).or_insert_with(|| implied_container(next)))
        }
        Value::Array(seq) => {
            let len = seq.len();
            let index = match step {
                // A sequence may grow by exactly one slot: Index(len)
                // appends, as does FromEnd(0) against an empty sequence.
                Step::Index(index) if *index == len => {
                    seq.push(implied_container(next));
                    len
                }
                Step::FromEnd(0) if len == 0 => {
                    seq.push(implied_container(next));
                    0
                }
                step => sequence_index(step, len)?,
            };
            Ok(&mut seq[index])
        }
        _ => Err(Error::NotAContainer),
    }
}

pub(crate) fn walk<'a>(doc: &'a Value, steps: &[Step]) -> Result<&'a Value, Error> {
    let mut current = doc;
    for step in steps {
        current = descend(current, step)?;
    }
    Ok(current)
}

pub(crate) fn walk_mut<'a>(doc: &'a mut Value, steps: &[Step]) -> Result<&'a mut Value, Error> {
    let mut current = doc;
    for step in steps {
        current = descend_mut(current, step)?;
    }
    Ok(current)
}

/// Resolve `path` against existing structure only.
///
/// The empty path returns the container itself.
pub fn at<'a>(doc: &'a Value, path: &Path) -> Result<&'a Value, Error> {
    walk(doc, path.steps())
}

/// Mutable variant of [`at`].
pub fn at_mut<'a>(doc: &'a mut Value, path: &Path) -> Result<&'a mut Value, Error> {
    walk_mut(doc, path.steps())
}

/// Resolve `path`, creating missing intermediate containers.
///
/// The kind of each created container is inferred from the next step;
/// a trailing missing step materializes as an empty mapping. Existing
/// scalars are never replaced: they fail with
/// [`Error::NotAContainer`].
pub fn vivify<'a>(doc: &'a mut Value, path: &Path) -> Result<&'a mut Value, Error> {
    let steps = path.steps();
    let mut current = doc;
    for (pos, step) in steps.iter().enumerate() {
        current = descend_or_create(current, step, steps.get(pos + 1))?;
    }
    Ok(current)
}

/// Resolve the parent container of `path`'s final step, without
/// creating anything. Lookup misses along the way collapse into
/// [`Error::ParentNotFound`] carrying the full target path.
///
/// Returns `None` for the root path, which has no parent.
pub(crate) fn parent_mut<'a, 'p>(
    doc: &'a mut Value,
    path: &'p Path,
) -> Result<Option<(&'a mut Value, &'p Step)>, Error> {
    let Some((parent_steps, last)) = path.split_last() else {
        return Ok(None);
    };
    let parent = walk_mut(doc, parent_steps).map_err(|e| e.into_parent_not_found(path))?;
    Ok(Some((parent, last)))
}
