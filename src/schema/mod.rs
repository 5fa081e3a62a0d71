//! Feature schema: the ordered column list and per-feature typing rules.
//!
//! This module provides:
//! - Side-car loading of the ordered feature list (column order for the model)
//! - The declarative table mapping each numeric feature to its bounds

pub mod feature_table;
pub mod loader;
