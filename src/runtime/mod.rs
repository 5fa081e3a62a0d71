//! Runtime module: ties the stages into the single-shot pipeline.
//!
//! This module provides:
//! - Pipeline configuration (where the side-car artifacts live)
//! - The loader → normalizer → predictor orchestration
//! - The serialized result payload

pub mod pipeline;
