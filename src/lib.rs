//! # TasteHub Predict
//!
//! Single-shot inference shim for the TasteHub engagement-rate model:
//! one JSON object in on stdin, one JSON prediction line out on stdout.
//!
//! ## Stages
//!
//! 1. **Schema loading** — the ordered feature list from its side-car file
//! 2. **Input normalization** — required-key checks, type coercion, range
//!    clamping driven by a single declarative feature table
//! 3. **Prediction** — a single-row frame scored by the linear artifact
//!
//! Each invocation is stateless. Any failure, at any stage, collapses to one
//! `{"error": "<message>"}` line on stderr and exit code 1.

pub mod error;
pub mod input;
pub mod model;
pub mod runtime;
pub mod schema;

/// Artifact file names, fixed by contract.
///
/// Both files are external collaborators produced by the training side and
/// shipped next to the executable; this program only reads them.
pub mod config {
    /// Model artifact file name.
    pub const MODEL_FILE: &str = "tastehub_engagement_rate_model.json";

    /// Feature-list file name.
    pub const FEATURE_FILE: &str = "tastehub_features.json";
}
