//! Error taxonomy for the inference shim.
//!
//! Every failure collapses to one externally visible shape: a single
//! `{"error": "<message>"}` line on stderr and exit code 1. Callers
//! distinguish causes by message text, so each variant owns its exact
//! wording here and nowhere else.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by every stage of the shim.
pub type ShimResult<T> = Result<T, ShimError>;

/// All the ways a single-shot invocation can fail.
#[derive(Debug, Error)]
pub enum ShimError {
    /// Stdin was empty or whitespace only.
    #[error("Empty stdin payload.")]
    EmptyPayload,

    /// Stdin did not parse as JSON.
    #[error("Invalid JSON payload: {0}")]
    MalformedPayload(String),

    /// Stdin parsed as JSON but the document is not an object.
    #[error("Payload must be a JSON object.")]
    NonObjectPayload,

    /// One or more schema features are absent from the payload,
    /// listed in schema order.
    #[error("Missing required features: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),

    /// A numeric feature was null, empty, non-finite, or not coercible.
    #[error("Feature '{0}' must be numeric.")]
    NotNumeric(String),

    /// A string feature was null.
    #[error("Feature '{0}' must be a string.")]
    NotString(String),

    /// The model artifact is not at its expected path.
    #[error("Model file not found: {}", .0.display())]
    ModelFileMissing(PathBuf),

    /// The feature-list file is not at its expected path.
    #[error("Feature file not found: {}", .0.display())]
    FeatureFileMissing(PathBuf),

    /// The feature-list file was unreadable or not a JSON array of strings.
    #[error("Invalid feature file: {}", .0.display())]
    InvalidFeatureFile(PathBuf),

    /// The model artifact was unreadable or not the expected shape.
    #[error("Invalid model file: {}", .0.display())]
    InvalidModelFile(PathBuf),

    /// The artifact carries no weights for a schema column.
    #[error("Model has no weights for feature '{0}'.")]
    MissingWeights(String),

    /// The model produced no prediction rows.
    #[error("Model returned no predictions.")]
    PredictionEmpty,

    /// The shim's own location could not be determined.
    #[error("Failed to locate executable: {0}")]
    ExecutableLocation(String),

    /// The result object could not be serialized.
    #[error("Failed to serialize output: {0}")]
    OutputSerialization(String),
}

impl ShimError {
    /// Process exit code. Every failure maps to 1; only 0 and 1 exist.
    #[inline]
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Render the externally visible failure shape.
    pub fn to_json_error(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }

    /// Numeric-coercion failure for a named feature.
    #[inline]
    pub fn not_numeric(feature: impl Into<String>) -> Self {
        Self::NotNumeric(feature.into())
    }

    /// String-coercion failure for a named feature.
    #[inline]
    pub fn not_string(feature: impl Into<String>) -> Self {
        Self::NotString(feature.into())
    }
}
