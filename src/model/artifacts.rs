//! Persistence for the fitted scaler/classifier pair.
//!
//! Each half is written as a pretty-printed JSON blob carrying a format
//! version and the feature column schema, so the loader can refuse
//! artifacts produced against a different contract. Writes go through a
//! temp file and an atomic rename; a failed run never leaves a partial
//! artifact behind.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PhishguardError, Result};
use crate::features::vector::FEATURE_COLUMNS;
use crate::model::forest::RandomForestClassifier;
use crate::model::scaler::StandardScaler;

/// Artifact schema version; bump on any incompatible layout change.
pub const FORMAT_VERSION: u32 = 1;

/// File name of the scaler blob inside the artifacts directory.
pub const SCALER_FILE: &str = "scaler.json";

/// File name of the classifier blob inside the artifacts directory.
pub const MODEL_FILE: &str = "model.json";

/// Metadata recorded alongside the fitted classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier.
    pub name: String,
    /// Version of the library that produced the artifacts.
    pub version: String,
    /// Training timestamp.
    pub trained_at: DateTime<Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Number of held-out evaluation examples.
    pub test_examples: usize,
    /// Held-out performance metrics (accuracy, per-class f1, ...).
    pub validation_metrics: HashMap<String, f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ScalerArtifact {
    format_version: u32,
    feature_columns: Vec<String>,
    scaler: StandardScaler,
}

#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    format_version: u32,
    feature_columns: Vec<String>,
    metadata: ModelMetadata,
    forest: RandomForestClassifier,
}

/// Persist the fitted pair to `dir`.
///
/// Both blobs are fully serialized before anything touches the filesystem,
/// and each file is renamed into place only after its content is written.
pub fn save_artifacts(
    dir: &Path,
    scaler: &StandardScaler,
    forest: &RandomForestClassifier,
    metadata: &ModelMetadata,
) -> Result<()> {
    let columns: Vec<String> = FEATURE_COLUMNS.iter().map(|name| name.to_string()).collect();

    let scaler_json = serde_json::to_string_pretty(&ScalerArtifact {
        format_version: FORMAT_VERSION,
        feature_columns: columns.clone(),
        scaler: scaler.clone(),
    })?;
    let model_json = serde_json::to_string_pretty(&ModelArtifact {
        format_version: FORMAT_VERSION,
        feature_columns: columns,
        metadata: metadata.clone(),
        forest: forest.clone(),
    })?;

    fs::create_dir_all(dir)?;
    write_atomic(&dir.join(SCALER_FILE), &scaler_json)?;
    write_atomic(&dir.join(MODEL_FILE), &model_json)?;
    Ok(())
}

/// Load the fitted pair from `dir`, verifying version and schema agreement.
pub fn load_artifacts(
    dir: &Path,
) -> Result<(StandardScaler, RandomForestClassifier, ModelMetadata)> {
    let scaler_path = dir.join(SCALER_FILE);
    let scaler_content = fs::read_to_string(&scaler_path).map_err(|error| {
        PhishguardError::model(format!(
            "could not read {}: {error}",
            scaler_path.display()
        ))
    })?;
    let scaler_artifact: ScalerArtifact = serde_json::from_str(&scaler_content)
        .map_err(|error| {
            PhishguardError::model(format!("corrupt scaler artifact: {error}"))
        })?;

    let model_path = dir.join(MODEL_FILE);
    let model_content = fs::read_to_string(&model_path).map_err(|error| {
        PhishguardError::model(format!("could not read {}: {error}", model_path.display()))
    })?;
    let model_artifact: ModelArtifact = serde_json::from_str(&model_content)
        .map_err(|error| {
            PhishguardError::model(format!("corrupt model artifact: {error}"))
        })?;

    for (label, version) in [
        ("scaler", scaler_artifact.format_version),
        ("model", model_artifact.format_version),
    ] {
        if version != FORMAT_VERSION {
            return Err(PhishguardError::model(format!(
                "{label} artifact has format version {version}, expected {FORMAT_VERSION}"
            )));
        }
    }

    for (label, columns) in [
        ("scaler", &scaler_artifact.feature_columns),
        ("model", &model_artifact.feature_columns),
    ] {
        if columns.as_slice() != FEATURE_COLUMNS.map(|name| name.to_string()).as_slice() {
            return Err(PhishguardError::model(format!(
                "{label} artifact was produced for a different feature schema"
            )));
        }
    }

    Ok((
        scaler_artifact.scaler,
        model_artifact.forest,
        model_artifact.metadata,
    ))
}

/// Write `content` to `path` via a sibling temp file and rename.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::forest::ForestConfig;

    fn fitted_pair() -> (StandardScaler, RandomForestClassifier) {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for offset in 0..10 {
            features.push(vec![-1.0 - offset as f64, 1.0]);
            labels.push(-1);
            features.push(vec![1.0 + offset as f64, -1.0]);
            labels.push(1);
        }

        let mut scaler = StandardScaler::new();
        scaler.fit(&features).unwrap();
        let scaled = scaler.transform_matrix(&features).unwrap();

        let mut forest = RandomForestClassifier::new(ForestConfig {
            n_trees: 5,
            ..ForestConfig::default()
        });
        forest.fit(&scaled, &labels).unwrap();
        (scaler, forest)
    }

    fn metadata() -> ModelMetadata {
        ModelMetadata {
            name: "phishguard".to_string(),
            version: "test".to_string(),
            trained_at: Utc::now(),
            training_examples: 20,
            test_examples: 5,
            validation_metrics: HashMap::from([("accuracy".to_string(), 1.0)]),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (scaler, forest) = fitted_pair();

        save_artifacts(dir.path(), &scaler, &forest, &metadata()).unwrap();
        let (loaded_scaler, loaded_forest, loaded_metadata) =
            load_artifacts(dir.path()).unwrap();

        assert_eq!(loaded_scaler, scaler);
        assert_eq!(loaded_metadata.training_examples, 20);
        let row = scaler.transform(&[-3.0, 1.0]).unwrap();
        assert_eq!(
            loaded_forest.predict_proba(&row).unwrap(),
            forest.predict_proba(&row).unwrap()
        );
    }

    #[test]
    fn test_missing_artifacts_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_artifacts(dir.path()).is_err());
    }

    #[test]
    fn test_schema_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (scaler, forest) = fitted_pair();
        save_artifacts(dir.path(), &scaler, &forest, &metadata()).unwrap();

        // Rewrite the scaler blob with a foreign column schema.
        let path = dir.path().join(SCALER_FILE);
        let mut value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        value["feature_columns"][0] = serde_json::json!("something_else");
        fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        assert!(load_artifacts(dir.path()).is_err());
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (scaler, forest) = fitted_pair();
        save_artifacts(dir.path(), &scaler, &forest, &metadata()).unwrap();

        let path = dir.path().join(MODEL_FILE);
        let mut value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        value["format_version"] = serde_json::json!(99);
        fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        assert!(load_artifacts(dir.path()).is_err());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let (scaler, forest) = fitted_pair();
        save_artifacts(dir.path(), &scaler, &forest, &metadata()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
