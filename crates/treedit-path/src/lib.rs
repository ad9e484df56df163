//! Path primitives for addressing locations inside nested containers.
//!
//! A [`Path`] is an ordered sequence of [`Step`]s. Each step is either a
//! mapping key, an absolute sequence index, or a from-end index that is
//! resolved against the sequence length only at traversal time.
//!
//! Paths parse from and format to JSON Pointer strings (RFC 6901), with
//! two extra spellings for from-end indices: `-` / `last` for the last
//! position and `last-N` for the Nth position from the end.
//!
//! # Example
//!
//! ```
//! use treedit_path::{Path, Step};
//!
//! let path: Path = "/foo/0/last".parse().unwrap();
//! assert_eq!(
//!     path.steps(),
//!     &[Step::key("foo"), Step::index(0), Step::from_end(0)]
//! );
//! assert_eq!(path.to_pointer(), "/foo/0/-");
//! ```

pub mod path;
pub mod step;

pub use path::{Path, PathParseError};
pub use step::Step;

/// Unescapes a pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer path component.
///
/// Per RFC 6901, `/` is replaced with `~1` and `~` is replaced with `~0`.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a string is a valid non-negative decimal index.
///
/// Leading zeros are rejected, so `"01"` is a key, not an index.
pub fn is_valid_index(component: &str) -> bool {
    if component.is_empty() {
        return false;
    }
    let bytes = component.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}
