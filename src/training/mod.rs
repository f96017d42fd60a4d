//! Offline training pipeline.
//!
//! A batch job, run once per model version: load the labeled feature
//! dataset, split it, fit the scaler and the forest, evaluate on the
//! held-out split, and persist the artifact pair. It shares nothing with
//! the serving path except the files it writes.

pub mod dataset;
pub mod metrics;
pub mod pipeline;
pub mod split;

pub use dataset::{Dataset, TrainingExample};
pub use metrics::{ClassMetrics, EvaluationReport, accuracy};
pub use pipeline::{TrainingConfig, TrainingReport, train};
pub use split::stratified_split;
