//! The tabular structure handed to the model.

use serde_json::Value;

use crate::input::normalize::NormalizedRecord;

/// A schema-ordered table: named columns plus rows of JSON values.
///
/// The shim only ever builds one row, but prediction is defined over rows,
/// so the model yields a vector and the caller takes the first entry.
#[derive(Clone, Debug)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Build a one-row frame from a normalized record, with columns exactly
    /// in `feature_order`.
    pub fn single(record: &NormalizedRecord, feature_order: &[String]) -> Self {
        let row = feature_order
            .iter()
            .map(|name| record.get(name).cloned().unwrap_or(Value::Null))
            .collect();
        Self {
            columns: feature_order.to_vec(),
            rows: vec![row],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::normalize::normalize_input;
    use serde_json::json;

    fn record_for(payload: serde_json::Value, schema: &[&str]) -> (NormalizedRecord, Vec<String>) {
        let order: Vec<String> = schema.iter().map(|name| name.to_string()).collect();
        let map = match payload {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        };
        (normalize_input(&map, &order).unwrap(), order)
    }

    #[test]
    fn test_single_row_in_schema_order() {
        let (record, order) = record_for(
            json!({"creative_score": 8.0, "platform": "Facebook", "post_hour": 13}),
            &["platform", "post_hour", "creative_score"],
        );

        let frame = Frame::single(&record, &order);
        assert_eq!(frame.n_rows(), 1);
        assert_eq!(frame.columns(), &["platform", "post_hour", "creative_score"]);
        assert_eq!(
            frame.rows()[0],
            vec![json!("Facebook"), json!(13), json!(8.0)]
        );
    }

    #[test]
    fn test_columns_never_reorder_with_payload() {
        let (record, order) = record_for(
            json!({"b": "two", "a": "one"}),
            &["a", "b"],
        );

        let frame = Frame::single(&record, &order);
        assert_eq!(frame.columns(), &["a", "b"]);
        assert_eq!(frame.rows()[0], vec![json!("one"), json!("two")]);
    }
}
