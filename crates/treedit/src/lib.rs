//! Path-addressed navigation and structural edits over nested
//! JSON-like containers.
//!
//! Locations inside a container graph are addressed by a
//! [`Path`] of typed steps (mapping keys, sequence indices, or
//! from-end indices). On top of the resolver sit accessors
//! ([`exists`], [`get`], [`set`]), structural edits ([`add`],
//! [`remove`], [`replace`], [`move_value`], [`copy_value`],
//! [`transform`]), a transactional [`patch`] engine, and traversal
//! utilities ([`list`], [`flatten`]).
//!
//! Every edit comes in a copying flavor (deep-clones, returns the
//! edited copy, original untouched) and an in-place `_mut` flavor.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use treedit::{get, set, Path};
//!
//! let mut doc = json!({});
//! let path: Path = "/a/b/0".parse().unwrap();
//!
//! // set auto-vivifies missing intermediate containers, inferring
//! // each one's kind from the next step
//! set(&mut doc, &path, json!("diamond")).unwrap();
//! assert_eq!(doc, json!({"a": {"b": ["diamond"]}}));
//! assert_eq!(get(&doc, &path).unwrap(), &json!("diamond"));
//! ```
//!
//! Patches apply all-or-nothing:
//!
//! ```
//! use serde_json::json;
//! use treedit::{patch, Operation};
//!
//! let doc = json!({"a": {"b": {"c": "x"}}});
//! let ops = vec![
//!     Operation::Replace { path: "/a/b/c".parse().unwrap(), value: json!(42) },
//!     Operation::Test { path: "/a/b/c".parse().unwrap(), value: json!("C") },
//! ];
//! let err = patch(&doc, &ops).unwrap_err();
//! assert_eq!(err.index, 1);
//! // The original is untouched on failure
//! assert_eq!(doc, json!({"a": {"b": {"c": "x"}}}));
//! ```

pub mod access;
pub mod codec;
pub mod edit;
pub mod error;
pub mod patch;
pub mod resolve;
pub mod traverse;

pub use access::{exists, exists_with, get, get_with, set, ExistsCheck, GetMode, Projection};
pub use codec::{from_json, from_json_patch, to_json, to_json_patch, validate_operations, CodecError};
pub use edit::{
    add, add_mut, copy_mut, copy_value, move_mut, move_value, remove, remove_mut, replace,
    replace_mut, transform, transform_mut,
};
pub use error::Error;
pub use patch::{patch, patch_mut, Operation, PatchError, PatchFailure};
pub use resolve::{at, at_mut, vivify};
pub use traverse::{flatten, list, Leaves};

pub use treedit_path::{Path, PathParseError, Step};
