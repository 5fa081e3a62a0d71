//! The model artifact and its tabular input.
//!
//! This module provides:
//! - The deserialized linear scoring artifact (`ScoreModel`)
//! - The single-row, schema-ordered frame handed to prediction

pub mod artifact;
pub mod frame;
