//! Declarative per-feature typing and bounds.
//!
//! The numeric feature set and its clamping rules live in one table, so the
//! "is it numeric" classification and the clamp logic cannot diverge. Every
//! feature missing from the table is plain text.

use serde_json::Value;

use crate::error::{ShimError, ShimResult};

/// How a feature is typed and bounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeatureKind {
    /// Coerced to a float, rounded to the nearest integer (ties to even),
    /// then clamped to `[min, max]`. `max = None` means unbounded above.
    Integer { min: i64, max: Option<i64> },

    /// Coerced to a float and clamped to `[min, max]`, never rounded.
    Float { min: f64, max: f64 },

    /// Passed through as text; any non-null value is accepted.
    Text,
}

/// Typing and bounds for every numeric feature.
const NUMERIC_FEATURES: &[(&str, FeatureKind)] = &[
    ("hashtags_count", FeatureKind::Integer { min: 0, max: None }),
    ("post_hour", FeatureKind::Integer { min: 0, max: Some(23) }),
    ("caption_length", FeatureKind::Integer { min: 0, max: None }),
    ("creative_score", FeatureKind::Float { min: 0.0, max: 10.0 }),
    ("posts_last_7_days", FeatureKind::Integer { min: 0, max: None }),
    ("follower_count", FeatureKind::Integer { min: 0, max: None }),
];

/// Look up how a feature is typed. Unknown names are text.
pub fn kind_for(feature: &str) -> FeatureKind {
    NUMERIC_FEATURES
        .iter()
        .find(|(name, _)| *name == feature)
        .map(|(_, kind)| *kind)
        .unwrap_or(FeatureKind::Text)
}

/// Coerce, round, and clamp one raw value according to its feature's kind.
///
/// Integer kinds yield a JSON integer, float kinds a JSON float, text kinds
/// a JSON string. The error names the feature, never the raw value.
pub fn normalize_value(feature: &str, value: &Value) -> ShimResult<Value> {
    match kind_for(feature) {
        FeatureKind::Integer { min, max } => {
            let raw = coerce_numeric(feature, value)?;
            let mut rounded = raw.round_ties_even() as i64;
            rounded = rounded.max(min);
            if let Some(upper) = max {
                rounded = rounded.min(upper);
            }
            Ok(Value::from(rounded))
        }
        FeatureKind::Float { min, max } => {
            let raw = coerce_numeric(feature, value)?;
            Ok(Value::from(raw.clamp(min, max)))
        }
        FeatureKind::Text => match value {
            Value::Null => Err(ShimError::not_string(feature)),
            Value::String(text) => Ok(Value::from(text.clone())),
            other => Ok(Value::from(other.to_string())),
        },
    }
}

/// Coerce a raw JSON value to a finite float.
///
/// Accepts numbers, numeric strings (trimmed), and booleans. Null, empty
/// strings, unparseable strings, and non-finite results are all rejected
/// with the same message.
fn coerce_numeric(feature: &str, value: &Value) -> ShimResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    };
    match parsed {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(ShimError::not_numeric(feature)),
    }
}
