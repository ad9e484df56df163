//! Structural edits: add, remove, replace, move, copy, transform.
//!
//! Every operation comes in two flavors sharing one core: the `_mut`
//! variant mutates the caller's container in place, and the plain
//! variant deep-clones first and returns the edited copy, leaving the
//! original untouched.

use serde_json::Value;
use treedit_path::{Path, Step};

use crate::error::Error;
use crate::resolve::{self, sequence_index};

/// Resolve `step` to an insertion position within `[0, len]`.
///
/// `Index(len)` and `FromEnd(0)` both mean "append"; any other from-end
/// step inserts before the element it resolves to.
fn insert_index(step: &Step, len: usize) -> Result<usize, Error> {
    match step {
        Step::Index(index) => {
            if *index <= len {
                Ok(*index)
            } else {
                Err(Error::IndexOutOfBounds { index: *index, len })
            }
        }
        Step::FromEnd(0) => Ok(len),
        step => sequence_index(step, len),
    }
}

/// Insert `value` at `path`, in place.
///
/// The parent of the final step must already exist; unlike
/// [`crate::set`], nothing is vivified. A mapping parent inserts or
/// overwrites the key; a sequence parent inserts before the resolved
/// index. The root path replaces the whole container.
pub fn add_mut(doc: &mut Value, path: &Path, value: Value) -> Result<(), Error> {
    let Some((parent, last)) = resolve::parent_mut(doc, path)? else {
        *doc = value;
        return Ok(());
    };
    match parent {
        Value::Object(map) => {
            let key = resolve::mapping_key(last)?;
            map.insert(key, value);
            Ok(())
        }
        Value::Array(seq) => {
            let index = insert_index(last, seq.len())?;
            seq.insert(index, value);
            Ok(())
        }
        _ => Err(Error::NotAContainer),
    }
}

/// Remove the value at `path`, in place, returning it.
///
/// The target must exist. Removing the root leaves `Null` behind and
/// returns the old container. Mapping removal preserves the insertion
/// order of the surviving keys.
pub fn remove_mut(doc: &mut Value, path: &Path) -> Result<Value, Error> {
    let Some((parent_steps, last)) = path.split_last() else {
        return Ok(std::mem::replace(doc, Value::Null));
    };
    let parent = resolve::walk_mut(doc, parent_steps).map_err(|e| e.into_not_found(path))?;
    match parent {
        Value::Object(map) => {
            let key = resolve::mapping_key(last)?;
            map.shift_remove(&key).ok_or(Error::PathNotFound {
                path: path.clone(),
            })
        }
        Value::Array(seq) => {
            let index =
                sequence_index(last, seq.len()).map_err(|e| e.into_not_found(path))?;
            Ok(seq.remove(index))
        }
        _ => Err(Error::NotAContainer),
    }
}

/// Overwrite the existing value at `path`, in place.
///
/// Resolve-check-then-overwrite in a single pass, so no transient
/// intermediate state is ever observable. Fails with
/// [`Error::PathNotFound`] if the target is absent.
pub fn replace_mut(doc: &mut Value, path: &Path, value: Value) -> Result<(), Error> {
    let slot = resolve::at_mut(doc, path).map_err(|e| e.into_not_found(path))?;
    *slot = value;
    Ok(())
}

/// Move the value at `from` to `path`, in place.
///
/// `from` must exist and must not be a proper prefix of `path` (a node
/// cannot move into its own descendant). Removal happens first; the
/// destination parent is resolved only afterwards, so when both paths
/// share a sequence parent the destination index refers to the
/// already-shifted sequence.
pub fn move_mut(doc: &mut Value, from: &Path, path: &Path) -> Result<(), Error> {
    if from.is_prefix_of(path) {
        return Err(Error::InvalidMoveTarget);
    }
    let value = remove_mut(doc, from)?;
    add_mut(doc, path, value)
}

/// Copy the value at `from` to `path`, in place.
///
/// Same prefix restriction as [`move_mut`]; the source is left
/// untouched.
pub fn copy_mut(doc: &mut Value, from: &Path, path: &Path) -> Result<(), Error> {
    if from.is_prefix_of(path) {
        return Err(Error::InvalidMoveTarget);
    }
    let value = resolve::at(doc, from)
        .map_err(|e| e.into_not_found(from))?
        .clone();
    add_mut(doc, path, value)
}

/// Replace the value at `path` with `f` applied to it, in place.
pub fn transform_mut(
    doc: &mut Value,
    path: &Path,
    f: impl FnOnce(&Value) -> Value,
) -> Result<(), Error> {
    let slot = resolve::at_mut(doc, path).map_err(|e| e.into_not_found(path))?;
    let next = f(slot);
    *slot = next;
    Ok(())
}

/// Copying variant of [`add_mut`]: returns the edited copy.
pub fn add(doc: &Value, path: &Path, value: Value) -> Result<Value, Error> {
    let mut working = doc.clone();
    add_mut(&mut working, path, value)?;
    Ok(working)
}

/// Copying variant of [`remove_mut`]: returns the edited copy.
pub fn remove(doc: &Value, path: &Path) -> Result<Value, Error> {
    let mut working = doc.clone();
    remove_mut(&mut working, path)?;
    Ok(working)
}

/// Copying variant of [`replace_mut`]: returns the edited copy.
pub fn replace(doc: &Value, path: &Path, value: Value) -> Result<Value, Error> {
    let mut working = doc.clone();
    replace_mut(&mut working, path, value)?;
    Ok(working)
}

/// Copying variant of [`move_mut`]: returns the edited copy.
pub fn move_value(doc: &Value, from: &Path, path: &Path) -> Result<Value, Error> {
    let mut working = doc.clone();
    move_mut(&mut working, from, path)?;
    Ok(working)
}

/// Copying variant of [`copy_mut`]: returns the edited copy.
pub fn copy_value(doc: &Value, from: &Path, path: &Path) -> Result<Value, Error> {
    let mut working = doc.clone();
    copy_mut(&mut working, from, path)?;
    Ok(working)
}

/// Copying variant of [`transform_mut`]: returns the edited copy.
pub fn transform(
    doc: &Value,
    path: &Path,
    f: impl FnOnce(&Value) -> Value,
) -> Result<Value, Error> {
    let mut working = doc.clone();
    transform_mut(&mut working, path, f)?;
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
    fn add_requires_existing_parent() {
        let doc = json!({});
        assert_eq!(
            add(&doc, &p("/a/b"), json!(1)),
            Err(Error::ParentNotFound { path: p("/a/b") })
        );
    }

    #[test]
    fn add_into_mapping_overwrites() {
        let doc = json!({"a": 1});
        assert_eq!(add(&doc, &p("/a"), json!(2)).unwrap(), json!({"a": 2}));
        assert_eq!(
            add(&doc, &p("/b"), json!(3)).unwrap(),
            json!({"a": 1, "b": 3})
        );
    }

    #[test]
    fn add_into_sequence_inserts_before() {
        let doc = json!([1, 2, 3]);
        assert_eq!(add(&doc, &p("/1"), json!(9)).unwrap(), json!([1, 9, 2, 3]));
        assert_eq!(add(&doc, &p("/3"), json!(9)).unwrap(), json!([1, 2, 3, 9]));
        assert_eq!(add(&doc, &p("/-"), json!(9)).unwrap(), json!([1, 2, 3, 9]));
        assert_eq!(
            add(&doc, &p("/last-1"), json!(9)).unwrap(),
            json!([1, 9, 2, 3])
        );
        assert_eq!(
            add(&doc, &p("/4"), json!(9)),
            Err(Error::IndexOutOfBounds { index: 4, len: 3 })
        );
    }

    #[test]
    fn add_at_root_replaces() {
        let doc = json!({"a": 1});
        assert_eq!(add(&doc, &Path::root(), json!([1])).unwrap(), json!([1]));
    }

    #[test]
    fn remove_requires_target() {
        let doc = json!({"a": 1});
        assert_eq!(
            remove(&doc, &p("/b")),
            Err(Error::PathNotFound { path: p("/b") })
        );
    }

    #[test]
    fn remove_splices_sequence() {
        let doc = json!({"xs": [1, 2, 3]});
        assert_eq!(remove(&doc, &p("/xs/1")).unwrap(), json!({"xs": [1, 3]}));
        assert_eq!(remove(&doc, &p("/xs/last")).unwrap(), json!({"xs": [1, 2]}));
    }

    #[test]
    fn remove_preserves_key_order() {
        let doc = json!({"a": 1, "b": 2, "c": 3});
        let out = remove(&doc, &p("/b")).unwrap();
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn remove_at_root_yields_null() {
        let mut doc = json!({"a": 1});
        let old = remove_mut(&mut doc, &Path::root()).unwrap();
        assert_eq!(old, json!({"a": 1}));
        assert_eq!(doc, json!(null));
    }

    #[test]
    fn replace_requires_target() {
        let doc = json!({"a": 1});
        assert_eq!(replace(&doc, &p("/a"), json!(2)).unwrap(), json!({"a": 2}));
        assert_eq!(
            replace(&doc, &p("/b"), json!(2)),
            Err(Error::PathNotFound { path: p("/b") })
        );
    }

    #[test]
    fn replace_at_root_is_idempotent() {
        for doc in [json!({"a": 1}), json!([1, 2]), json!("scalar"), json!(null)] {
            assert_eq!(
                replace(&doc, &Path::root(), json!({"v": true})).unwrap(),
                json!({"v": true})
            );
        }
    }

    #[test]
    fn move_rejects_own_descendant() {
        let doc = json!({"a": {"b": 1}});
        assert_eq!(
            move_value(&doc, &p("/a"), &p("/a/b")),
            Err(Error::InvalidMoveTarget)
        );
        assert_eq!(
            copy_value(&doc, &p("/a"), &p("/a/b")),
            Err(Error::InvalidMoveTarget)
        );
    }

    #[test]
    fn move_between_containers() {
        let doc = json!({"a": {"x": 1}, "b": {}});
        let out = move_value(&doc, &p("/a/x"), &p("/b/x")).unwrap();
        assert_eq!(out, json!({"a": {}, "b": {"x": 1}}));
    }

    #[test]
    fn move_resolves_destination_after_removal() {
        // Shared sequence parent: /1 is removed first, then the
        // destination index addresses the already-shifted sequence.
        let doc = json!([1, 2, 3, 4]);
        let out = move_value(&doc, &p("/1"), &p("/2")).unwrap();
        assert_eq!(out, json!([1, 3, 2, 4]));
    }

    #[test]
    fn copy_leaves_source_untouched() {
        let doc = json!({"a": {"x": 1}});
        let out = copy_value(&doc, &p("/a/x"), &p("/y")).unwrap();
        assert_eq!(out, json!({"a": {"x": 1}, "y": 1}));
    }

    #[test]
    fn transform_applies_function() {
        let doc = json!({"n": 20});
        let out = transform(&doc, &p("/n"), |v| {
            json!(v.as_i64().unwrap_or(0) * 2)
        })
        .unwrap();
        assert_eq!(out, json!({"n": 40}));
        assert_eq!(
            transform(&doc, &p("/m"), |v| v.clone()),
            Err(Error::PathNotFound { path: p("/m") })
        );
    }

    #[test]
    fn copying_variants_leave_original_untouched() {
        let doc = json!({"a": [1, 2]});
        let snapshot = doc.clone();
        let _ = add(&doc, &p("/a/0"), json!(0)).unwrap();
        let _ = remove(&doc, &p("/a/1")).unwrap();
        let _ = replace(&doc, &p("/a"), json!(null)).unwrap();
        assert_eq!(doc, snapshot);
    }
}
