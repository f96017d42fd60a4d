//! The trained model pair: standardization transform and classifier.
//!
//! Both halves are fitted offline by the training pipeline, persisted as
//! JSON artifacts, and loaded read-only at serving time.

pub mod artifacts;
pub mod forest;
pub mod scaler;

pub use artifacts::{FORMAT_VERSION, ModelMetadata, load_artifacts, save_artifacts};
pub use forest::{ForestConfig, RandomForestClassifier};
pub use scaler::StandardScaler;
