//! Batch processing logic.
//!
//! This module holds the sequential driver that takes every frame folder
//! under the input root through the estimator and the frame merge.

/// Sequential driver over all frame folders
pub mod batch;

pub use batch::{BatchEvent, VideoResult, run_batch};
