//! Single-shot pipeline: one payload in, one prediction out.
//!
//! Orchestrates the three stages in a fixed order:
//! 1. Schema loading — the ordered feature list from its side-car file
//! 2. Input normalization — required keys, type coercion, range clamps
//! 3. Prediction — a single-row frame scored by the loaded artifact
//!
//! Artifact existence is checked before stdin is touched, so a missing
//! model file reports the same way regardless of payload content.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config;
use crate::error::{ShimError, ShimResult};
use crate::input::normalize::{self, NormalizedRecord};
use crate::input::payload;
use crate::model::artifact::ScoreModel;
use crate::model::frame::Frame;
use crate::schema::loader;

/// Where the side-car artifacts live.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Directory holding both artifact files.
    pub base_dir: PathBuf,

    /// Model artifact file name within `base_dir`.
    pub model_file: String,

    /// Feature-list file name within `base_dir`.
    pub feature_file: String,
}

impl PipelineConfig {
    /// Production file names rooted at `base_dir`.
    pub fn at(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            model_file: config::MODEL_FILE.to_string(),
            feature_file: config::FEATURE_FILE.to_string(),
        }
    }

    /// Production file names rooted next to the running executable.
    pub fn for_executable() -> ShimResult<Self> {
        let exe = std::env::current_exe()
            .map_err(|err| ShimError::ExecutableLocation(err.to_string()))?;
        let base_dir = exe.parent().map(Path::to_path_buf).ok_or_else(|| {
            ShimError::ExecutableLocation("executable has no parent directory".to_string())
        })?;
        Ok(Self::at(base_dir))
    }

    /// Full path of the model artifact.
    pub fn model_path(&self) -> PathBuf {
        self.base_dir.join(&self.model_file)
    }

    /// Full path of the feature list.
    pub fn feature_path(&self) -> PathBuf {
        self.base_dir.join(&self.feature_file)
    }
}

/// The success payload: one prediction, the echoed record, the artifact name.
///
/// Serializes field-for-field as the output contract:
/// `{"prediction": <float>, "input": {...}, "model": "<file name>"}`.
#[derive(Debug, Serialize)]
pub struct PredictionReport {
    /// The model's first (only) prediction for the record.
    pub prediction: f64,

    /// The normalized record, echoed in schema order.
    pub input: NormalizedRecord,

    /// File name of the artifact that produced the prediction.
    pub model: String,
}

impl PredictionReport {
    /// Render the single stdout line.
    pub fn to_json_line(&self) -> ShimResult<String> {
        serde_json::to_string(self).map_err(|err| ShimError::OutputSerialization(err.to_string()))
    }
}

/// The stage orchestrator. Stateless; one `run` per process invocation.
pub struct InferencePipeline {
    config: PipelineConfig,
}

impl InferencePipeline {
    /// Create a pipeline over the given artifact locations.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the full loader → normalizer → predictor sequence over one
    /// payload read from `reader`.
    pub fn run<R: Read>(&self, reader: R) -> ShimResult<PredictionReport> {
        let model_path = self.config.model_path();
        if !model_path.exists() {
            return Err(ShimError::ModelFileMissing(model_path));
        }
        let feature_path = self.config.feature_path();
        if !feature_path.exists() {
            return Err(ShimError::FeatureFileMissing(feature_path));
        }

        let feature_order = loader::load_feature_order(&feature_path)?;
        tracing::info!("Schema loaded: {} features", feature_order.len());

        let raw = payload::read_payload(reader)?;
        let record = normalize::normalize_input(&raw, &feature_order)?;
        tracing::debug!("Normalized record: {} fields", record.len());

        let model = ScoreModel::load(&model_path)?;
        let frame = Frame::single(&record, &feature_order);
        let predictions = model.predict(&frame)?;
        let prediction = predictions
            .first()
            .copied()
            .ok_or(ShimError::PredictionEmpty)?;
        tracing::info!("Prediction: {}", prediction);

        Ok(PredictionReport {
            prediction,
            input: record,
            model: self.config.model_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn write_artifacts(features: serde_json::Value, model: serde_json::Value) -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(config::FEATURE_FILE),
            serde_json::to_string(&features).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join(config::MODEL_FILE),
            serde_json::to_string(&model).unwrap(),
        )
        .unwrap();
        dir
    }

    fn production_fixture() -> TempDir {
        write_artifacts(
            json!(["platform", "post_hour", "creative_score"]),
            json!({
                "version": "tastehub-engagement-rate-v1",
                "intercept": 0.25,
                "numeric": {"post_hour": 0.5, "creative_score": 2.0},
                "categorical": {"platform": {"Instagram": 1.0, "Facebook": 0.25}}
            }),
        )
    }

    fn run_at(dir: &TempDir, input: &str) -> ShimResult<PredictionReport> {
        InferencePipeline::new(PipelineConfig::at(dir.path())).run(input.as_bytes())
    }

    #[test]
    fn test_happy_path_prediction() {
        let dir = production_fixture();
        let report = run_at(
            &dir,
            r#"{"platform": "Instagram", "post_hour": 4, "creative_score": 1.5}"#,
        )
        .unwrap();

        assert!((report.prediction - 6.25).abs() < 1e-12);
        assert_eq!(report.model, config::MODEL_FILE);
        assert_eq!(report.input.get("post_hour"), Some(&json!(4)));
    }

    #[test]
    fn test_output_line_shape_and_order() {
        let dir = production_fixture();
        // Payload keys arrive in a different order than the schema.
        let report = run_at(
            &dir,
            r#"{"creative_score": 1.5, "post_hour": 4, "platform": "Instagram"}"#,
        )
        .unwrap();

        assert_eq!(
            report.to_json_line().unwrap(),
            r#"{"prediction":6.25,"input":{"platform":"Instagram","post_hour":4,"creative_score":1.5},"model":"tastehub_engagement_rate_model.json"}"#
        );
    }

    #[test]
    fn test_clamps_flow_through_to_the_model() {
        let dir = production_fixture();
        let report = run_at(
            &dir,
            r#"{"platform": "Instagram", "post_hour": 30, "creative_score": 15}"#,
        )
        .unwrap();

        assert_eq!(report.input.get("post_hour"), Some(&json!(23)));
        assert_eq!(report.input.get("creative_score"), Some(&json!(10.0)));
        let expected = 0.25 + 1.0 + 23.0 * 0.5 + 10.0 * 2.0;
        assert!((report.prediction - expected).abs() < 1e-12);
    }

    #[test]
    fn test_missing_model_wins_over_bad_stdin() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(config::FEATURE_FILE), "[]").unwrap();

        let err = run_at(&dir, "{not json").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Model file not found: {}",
                dir.path().join(config::MODEL_FILE).display()
            )
        );
    }

    #[test]
    fn test_missing_feature_file_reports_before_stdin() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(config::MODEL_FILE), "{}").unwrap();

        let err = run_at(&dir, "").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Feature file not found: {}",
                dir.path().join(config::FEATURE_FILE).display()
            )
        );
    }

    #[test]
    fn test_invalid_feature_file_reports_before_payload_errors() {
        let dir = write_artifacts(json!({"not": "an array"}), json!({}));

        let err = run_at(&dir, "").unwrap_err();
        assert!(err.to_string().starts_with("Invalid feature file: "));
    }

    #[test]
    fn test_empty_stdin_fails_after_schema() {
        let dir = production_fixture();
        let err = run_at(&dir, "  \n ").unwrap_err();
        assert_eq!(err.to_string(), "Empty stdin payload.");
    }

    #[test]
    fn test_non_object_stdin_is_rejected() {
        let dir = production_fixture();
        let err = run_at(&dir, "[1, 2, 3]").unwrap_err();
        assert_eq!(err.to_string(), "Payload must be a JSON object.");
    }

    #[test]
    fn test_missing_features_reported_from_pipeline() {
        let dir = production_fixture();
        let err = run_at(&dir, r#"{"platform": "Instagram"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required features: post_hour, creative_score"
        );
    }

    #[test]
    fn test_bad_payload_beats_bad_model_artifact() {
        // Normalization runs before the artifact is parsed.
        let dir = write_artifacts(json!(["post_hour"]), json!(["provably", "broken"]));

        let err = run_at(&dir, r#"{"post_hour": null}"#).unwrap_err();
        assert_eq!(err.to_string(), "Feature 'post_hour' must be numeric.");
    }

    #[test]
    fn test_invalid_model_reported_after_normalization() {
        let dir = write_artifacts(json!(["post_hour"]), json!(["not", "a", "model"]));

        let err = run_at(&dir, r#"{"post_hour": 9}"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid model file: "));
    }

    #[test]
    fn test_artifact_schema_mismatch_surfaces() {
        let dir = write_artifacts(
            json!(["platform", "caption"]),
            json!({
                "version": "v1",
                "intercept": 0.0,
                "numeric": {},
                "categorical": {"platform": {"Instagram": 1.0}}
            }),
        );

        let err = run_at(&dir, r#"{"platform": "Instagram", "caption": "hi"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Model has no weights for feature 'caption'.");
    }

    #[test]
    fn test_for_executable_resolves_a_directory() {
        let resolved = PipelineConfig::for_executable().unwrap();
        assert!(resolved.base_dir.is_dir());
        assert_eq!(resolved.model_file, config::MODEL_FILE);
        assert_eq!(resolved.feature_file, config::FEATURE_FILE);
    }
}
