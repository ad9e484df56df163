//! Policy-specific wrappers over the resolver: existence checks, reads,
//! and writes with auto-vivification.

use serde_json::Value;
use treedit_path::{Path, Step};

use crate::error::Error;
use crate::resolve;

/// Options for [`exists_with`].
///
/// `key` asks whether the terminal step resolves inside its parent
/// (undefined at the root); `value` asks whether the addressed value is
/// defined (trivially true at the root).
#[derive(Debug, Clone, Copy)]
pub struct ExistsCheck {
    pub key: bool,
    pub value: bool,
}

impl Default for ExistsCheck {
    fn default() -> Self {
        ExistsCheck {
            key: true,
            value: false,
        }
    }
}

/// Which projection of the addressed location [`get_with`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetMode {
    Value,
    Key,
    Pair,
}

/// The projection returned by [`get_with`].
#[derive(Debug, Clone, PartialEq)]
pub enum Projection<'a> {
    Value(&'a Value),
    Key(Step),
    Pair(Step, &'a Value),
}

/// Soft existence check with the default options (key check).
///
/// Resolution misses collapse to `Ok(false)`; malformed step/kind
/// combinations still propagate as errors. The root path has no key,
/// so the default options fail with [`Error::RootKeyOperation`].
pub fn exists(doc: &Value, path: &Path) -> Result<bool, Error> {
    exists_with(doc, path, ExistsCheck::default())
}

/// Soft existence check with explicit options. See [`exists`].
pub fn exists_with(doc: &Value, path: &Path, check: ExistsCheck) -> Result<bool, Error> {
    if path.is_root() {
        if check.value {
            return Ok(true);
        }
        return Err(Error::RootKeyOperation);
    }
    match resolve::at(doc, path) {
        Ok(_) => Ok(true),
        Err(Error::KeyNotFound { .. })
        | Err(Error::IndexOutOfBounds { .. })
        | Err(Error::NotAContainer) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Read the value at `path`.
///
/// The root path returns the container itself; a missing path fails
/// with [`Error::PathNotFound`].
pub fn get<'a>(doc: &'a Value, path: &Path) -> Result<&'a Value, Error> {
    if path.is_root() {
        return Ok(doc);
    }
    resolve::at(doc, path).map_err(|e| e.into_not_found(path))
}

/// Read a projection of the location at `path`.
///
/// `Key` and `Pair` modes fail with [`Error::RootKeyOperation`] at the
/// root, where key semantics are undefined.
pub fn get_with<'a>(doc: &'a Value, path: &Path, mode: GetMode) -> Result<Projection<'a>, Error> {
    match mode {
        GetMode::Value => Ok(Projection::Value(get(doc, path)?)),
        GetMode::Key => {
            let (_, last) = path.split_last().ok_or(Error::RootKeyOperation)?;
            get(doc, path)?;
            Ok(Projection::Key(last.clone()))
        }
        GetMode::Pair => {
            let (_, last) = path.split_last().ok_or(Error::RootKeyOperation)?;
            let value = get(doc, path)?;
            Ok(Projection::Pair(last.clone(), value))
        }
    }
}

/// Write `value` at `path`, creating missing intermediate containers.
///
/// The root path replaces the whole container, regardless of whether
/// the new value's kind matches the old one.
pub fn set(doc: &mut Value, path: &Path, value: Value) -> Result<(), Error> {
    let slot = resolve::vivify(doc, path)?;
    *slot = value;
    Ok(())
}
