//! Wire codecs for patch documents.

pub mod json;

pub use json::{from_json, from_json_patch, to_json, to_json_patch, validate_operations, CodecError};
