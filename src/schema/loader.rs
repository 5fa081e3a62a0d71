//! Feature-list side-car loading.

use std::fs;
use std::path::Path;

use crate::error::{ShimError, ShimResult};

/// Read the ordered feature list from `path`.
///
/// The file must exist and hold a JSON array of strings. Order is preserved;
/// it becomes both the required-key set and the model's column order.
pub fn load_feature_order(path: &Path) -> ShimResult<Vec<String>> {
    if !path.exists() {
        return Err(ShimError::FeatureFileMissing(path.to_path_buf()));
    }
    let text =
        fs::read_to_string(path).map_err(|_| ShimError::InvalidFeatureFile(path.to_path_buf()))?;
    let order: Vec<String> = serde_json::from_str(&text)
        .map_err(|_| ShimError::InvalidFeatureFile(path.to_path_buf()))?;
    tracing::debug!("Feature schema: {} columns from {}", order.len(), path.display());
    Ok(order)
}
