//! JSON codec for patch operations (RFC 6902 wire format).
//!
//! An operation record is `{op, path, value?, from?}` where `path` and
//! `from` are pointer strings. `move`/`copy` require `from`;
//! `add`/`replace`/`test` require `value`; `remove` requires neither.

use serde_json::{json, Map, Value};
use thiserror::Error;
use treedit_path::{Path, PathParseError};

use crate::patch::Operation;

/// Error decoding or validating a patch document.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    #[error("patch document must be an array")]
    NotAnArray,
    #[error("empty patch document")]
    EmptyPatch,
    #[error("operation must be an object")]
    NotAnObject,
    #[error("unknown op {0:?}")]
    UnknownOp(String),
    #[error("field {0:?} is missing or has the wrong type")]
    BadField(&'static str),
    #[error("invalid pointer: {0}")]
    Pointer(#[from] PathParseError),
    #[error("error in operation {index}: {source}")]
    Operation {
        index: usize,
        source: Box<CodecError>,
    },
}

fn decode_pointer(record: &Map<String, Value>, field: &'static str) -> Result<Path, CodecError> {
    let pointer = record
        .get(field)
        .and_then(Value::as_str)
        .ok_or(CodecError::BadField(field))?;
    Ok(pointer.parse()?)
}

fn decode_value(record: &Map<String, Value>) -> Result<Value, CodecError> {
    record
        .get("value")
        .cloned()
        .ok_or(CodecError::BadField("value"))
}

/// Decode a single operation record.
pub fn from_json(record: &Value) -> Result<Operation, CodecError> {
    let record = record.as_object().ok_or(CodecError::NotAnObject)?;
    let op = record
        .get("op")
        .and_then(Value::as_str)
        .ok_or(CodecError::BadField("op"))?;
    let path = decode_pointer(record, "path")?;
    match op {
        "add" => Ok(Operation::Add {
            path,
            value: decode_value(record)?,
        }),
        "remove" => Ok(Operation::Remove { path }),
        "replace" => Ok(Operation::Replace {
            path,
            value: decode_value(record)?,
        }),
        "move" => Ok(Operation::Move {
            path,
            from: decode_pointer(record, "from")?,
        }),
        "copy" => Ok(Operation::Copy {
            path,
            from: decode_pointer(record, "from")?,
        }),
        "test" => Ok(Operation::Test {
            path,
            value: decode_value(record)?,
        }),
        other => Err(CodecError::UnknownOp(other.to_string())),
    }
}

/// Decode a whole patch document (a non-empty array of records).
///
/// Errors carry the index of the offending record.
pub fn from_json_patch(doc: &Value) -> Result<Vec<Operation>, CodecError> {
    let records = doc.as_array().ok_or(CodecError::NotAnArray)?;
    if records.is_empty() {
        return Err(CodecError::EmptyPatch);
    }
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            from_json(record).map_err(|source| CodecError::Operation {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

/// Encode a single operation as an RFC 6902 record.
pub fn to_json(op: &Operation) -> Value {
    match op {
        Operation::Add { path, value } => json!({
            "op": "add",
            "path": path.to_pointer(),
            "value": value,
        }),
        Operation::Remove { path } => json!({
            "op": "remove",
            "path": path.to_pointer(),
        }),
        Operation::Replace { path, value } => json!({
            "op": "replace",
            "path": path.to_pointer(),
            "value": value,
        }),
        Operation::Move { path, from } => json!({
            "op": "move",
            "path": path.to_pointer(),
            "from": from.to_pointer(),
        }),
        Operation::Copy { path, from } => json!({
            "op": "copy",
            "path": path.to_pointer(),
            "from": from.to_pointer(),
        }),
        Operation::Test { path, value } => json!({
            "op": "test",
            "path": path.to_pointer(),
            "value": value,
        }),
    }
}

/// Encode a batch of operations as a patch document.
pub fn to_json_patch(ops: &[Operation]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

/// Structurally validate an untrusted raw patch document without
/// keeping the decoded operations.
pub fn validate_operations(doc: &Value) -> Result<(), CodecError> {
    from_json_patch(doc).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use treedit_path::Step;

    #[test]
    fn decode_rfc6902_records() {
        let ops = from_json_patch(&json!([
            {"op": "add", "path": "/a/b", "value": 1},
            {"op": "remove", "path": "/a"},
            {"op": "replace", "path": "/x/0", "value": null},
            {"op": "move", "path": "/y", "from": "/x"},
            {"op": "copy", "path": "/z", "from": "/y"},
            {"op": "test", "path": "", "value": {}},
        ]))
        .unwrap();
        assert_eq!(ops.len(), 6);
        assert_eq!(ops[0].op_name(), "add");
        assert_eq!(
            ops[2].path().steps(),
            &[Step::key("x"), Step::index(0)]
        );
        assert_eq!(ops[5].path(), &Path::root());
    }

    #[test]
    fn encode_decode_round_trip() {
        let ops = vec![
            Operation::Add {
                path: "/a~0b/c".parse().unwrap(),
                value: json!([1, 2]),
            },
            Operation::Move {
                path: "/dst".parse().unwrap(),
                from: "/src/-".parse().unwrap(),
            },
        ];
        let doc = to_json_patch(&ops);
        assert_eq!(from_json_patch(&doc).unwrap(), ops);
    }

    #[test]
    fn required_fields_enforced() {
        assert_eq!(
            from_json(&json!({"op": "add", "path": "/a"})),
            Err(CodecError::BadField("value"))
        );
        assert_eq!(
            from_json(&json!({"op": "move", "path": "/a"})),
            Err(CodecError::BadField("from"))
        );
        // remove needs neither value nor from
        assert!(from_json(&json!({"op": "remove", "path": "/a"})).is_ok());
    }

    #[test]
    fn unknown_op_rejected() {
        assert_eq!(
            from_json(&json!({"op": "flip", "path": "/a"})),
            Err(CodecError::UnknownOp("flip".into()))
        );
    }

    #[test]
    fn validate_reports_offending_index() {
        let err = validate_operations(&json!([
            {"op": "add", "path": "/a", "value": 1},
            {"op": "add", "path": "nope", "value": 1},
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            CodecError::Operation {
                index: 1,
                source: Box::new(CodecError::Pointer(
                    PathParseError::MissingLeadingSlash
                )),
            }
        );
    }

    #[test]
    fn document_shape_enforced() {
        assert_eq!(
            validate_operations(&json!({})),
            Err(CodecError::NotAnArray)
        );
        assert_eq!(validate_operations(&json!([])), Err(CodecError::EmptyPatch));
    }
}
