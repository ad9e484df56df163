//! Traversal utilities built on the accessors: leaf enumeration and
//! flattening.

use indexmap::IndexMap;
use serde_json::Value;
use treedit_path::Path;

use crate::error::Error;
use crate::resolve;

/// Lazy depth-first iterator over every leaf value under a path.
///
/// Mapping keys are visited in their container's insertion order,
/// sequence elements in index order. The iterator is `Clone`, so a
/// traversal can be restarted from any point by cloning it.
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    stack: Vec<(Path, &'a Value)>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (Path, &'a Value);

    fn next(&mut self) -> Option<(Path, &'a Value)> {
        while let Some((path, value)) = self.stack.pop() {
            match value {
                Value::Object(map) => {
                    // Pushed in reverse so the first key pops first
                    for (key, child) in map.iter().rev() {
                        self.stack.push((path.child(key.as_str()), child));
                    }
                }
                Value::Array(seq) => {
                    for (index, child) in seq.iter().enumerate().rev() {
                        self.stack.push((path.child(index), child));
                    }
                }
                leaf => return Some((path, leaf)),
            }
        }
        None
    }
}

/// Enumerate `(Path, Value)` pairs for every leaf reachable under
/// `path`, depth-first and in deterministic order.
///
/// Fails with [`Error::PathNotFound`] if `path` itself does not
/// resolve. Empty containers contribute no pairs.
pub fn list<'a>(doc: &'a Value, path: &Path) -> Result<Leaves<'a>, Error> {
    let start = resolve::at(doc, path).map_err(|e| e.into_not_found(path))?;
    Ok(Leaves {
        stack: vec![(path.clone(), start)],
    })
}

/// Materialize [`list`] as a map from full path to leaf value,
/// preserving traversal order.
pub fn flatten(doc: &Value, path: &Path) -> Result<IndexMap<Path, Value>, Error> {
    Ok(list(doc, path)?
        .map(|(path, value)| (path, value.clone()))
        .collect())
}
