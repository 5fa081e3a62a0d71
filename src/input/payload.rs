//! Raw payload acquisition.

use std::io::Read;

use serde_json::{Map, Value};

use crate::error::{ShimError, ShimResult};

/// Read one JSON object from `reader` (stdin in production).
///
/// The whole stream is consumed before parsing. Empty or whitespace-only
/// input, malformed JSON, and documents that are not objects are rejected.
pub fn read_payload<R: Read>(mut reader: R) -> ShimResult<Map<String, Value>> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .map_err(|err| ShimError::MalformedPayload(err.to_string()))?;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ShimError::EmptyPayload);
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|err| ShimError::MalformedPayload(err.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ShimError::NonObjectPayload),
    }
}
