//! Normalized Record construction.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ShimError, ShimResult};
use crate::schema::feature_table;

/// The validated, coerced, clamped record.
///
/// Invariant: exactly the schema's keys, in schema order, each value already
/// typed and clamped per the feature table. Serializes as a plain object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedRecord(Map<String, Value>);

impl NormalizedRecord {
    pub fn get(&self, feature: &str) -> Option<&Value> {
        self.0.get(feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validate `payload` against the ordered feature list and build the record.
///
/// All missing features are collected and reported together before any value
/// is coerced; coercion failures then surface one feature at a time, in
/// schema order.
pub fn normalize_input(
    payload: &Map<String, Value>,
    feature_order: &[String],
) -> ShimResult<NormalizedRecord> {
    let missing: Vec<String> = feature_order
        .iter()
        .filter(|feature| !payload.contains_key(feature.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ShimError::MissingFeatures(missing));
    }

    let mut record = Map::new();
    for feature in feature_order {
        // Presence is established by the missing-feature pass above.
        let raw = &payload[feature.as_str()];
        let value = feature_table::normalize_value(feature, raw)?;
        record.insert(feature.clone(), value);
    }
    Ok(NormalizedRecord(record))
}
