//! Model artifact loading and scoring.
//!
//! The artifact is a linear regression serialized as JSON: an intercept,
//! one coefficient per numeric column, and one weight table per categorical
//! column. Scoring a row is a dot product between a design vector and a
//! weight vector plus the intercept.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ndarray::Array1;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ShimError, ShimResult};
use crate::model::frame::Frame;
use crate::schema::feature_table::{self, FeatureKind};

/// The deserialized regression artifact.
#[derive(Clone, Debug, Deserialize)]
pub struct ScoreModel {
    /// Artifact identity, logged at load time. Never echoed in output.
    pub version: String,

    /// Bias term.
    pub intercept: f64,

    /// Coefficient per numeric column.
    pub numeric: HashMap<String, f64>,

    /// Weight table per categorical column, keyed by level.
    pub categorical: HashMap<String, HashMap<String, f64>>,
}

impl ScoreModel {
    /// Load and deserialize the artifact at `path`.
    ///
    /// A missing file and an unreadable or wrong-shaped file are distinct
    /// failures; both carry the full path checked.
    pub fn load(path: &Path) -> ShimResult<Self> {
        if !path.exists() {
            return Err(ShimError::ModelFileMissing(path.to_path_buf()));
        }
        let text =
            fs::read_to_string(path).map_err(|_| ShimError::InvalidModelFile(path.to_path_buf()))?;
        let model: Self = serde_json::from_str(&text)
            .map_err(|_| ShimError::InvalidModelFile(path.to_path_buf()))?;
        tracing::info!(
            "Loaded model artifact {} ({})",
            path.display(),
            model.version
        );
        Ok(model)
    }

    /// Score every row of `frame`, in row order.
    pub fn predict(&self, frame: &Frame) -> ShimResult<Vec<f64>> {
        frame
            .rows()
            .iter()
            .map(|row| self.score_row(frame.columns(), row))
            .collect()
    }

    /// Score one row: intercept + design · weights.
    ///
    /// A numeric column reads its coefficient from `numeric`, a text column
    /// its level weight from `categorical` with an indicator entry in the
    /// design vector. A column the artifact has no weights for at all is an
    /// artifact/schema mismatch; an unseen level inside a known categorical
    /// column merely contributes nothing.
    fn score_row(&self, columns: &[String], row: &[Value]) -> ShimResult<f64> {
        let mut design = Vec::with_capacity(columns.len());
        let mut weights = Vec::with_capacity(columns.len());

        for (column, value) in columns.iter().zip(row) {
            match feature_table::kind_for(column) {
                FeatureKind::Integer { .. } | FeatureKind::Float { .. } => {
                    let coefficient = self
                        .numeric
                        .get(column)
                        .copied()
                        .ok_or_else(|| ShimError::MissingWeights(column.clone()))?;
                    let x = value
                        .as_f64()
                        .ok_or_else(|| ShimError::not_numeric(column))?;
                    design.push(x);
                    weights.push(coefficient);
                }
                FeatureKind::Text => {
                    let table = self
                        .categorical
                        .get(column)
                        .ok_or_else(|| ShimError::MissingWeights(column.clone()))?;
                    let level = match value {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    };
                    design.push(1.0);
                    weights.push(table.get(&level).copied().unwrap_or(0.0));
                }
            }
        }

        let design = Array1::from(design);
        let weights = Array1::from(weights);
        Ok(self.intercept + design.dot(&weights))
    }
}
