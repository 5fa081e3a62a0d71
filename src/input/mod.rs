//! Untrusted input handling: stdin acquisition and record normalization.
//!
//! This module provides:
//! - One-shot JSON payload reading (empty/malformed/non-object rejection)
//! - The Normalized Record builder driven by the feature table

pub mod normalize;
pub mod payload;
