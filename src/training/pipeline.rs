//! The end-to-end training pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::model::artifacts::{ModelMetadata, save_artifacts};
use crate::model::forest::{ForestConfig, RandomForestClassifier};
use crate::model::scaler::StandardScaler;
use crate::training::dataset::Dataset;
use crate::training::metrics::EvaluationReport;
use crate::training::split::stratified_split;

/// Configuration for a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// CSV dataset of labeled feature rows.
    pub dataset_path: PathBuf,
    /// Directory the fitted artifacts are written to.
    pub artifacts_dir: PathBuf,
    /// Held-out share of the dataset.
    pub test_size: f64,
    /// Seed for the split and the forest.
    pub seed: u64,
    /// Number of trees in the forest.
    pub n_trees: usize,
    /// Maximum tree depth; `None` grows until purity.
    pub max_depth: Option<usize>,
}

impl TrainingConfig {
    /// Config with the standard 80/20 split, seed 42, and 100 trees.
    pub fn new(dataset_path: PathBuf, artifacts_dir: PathBuf) -> Self {
        Self {
            dataset_path,
            artifacts_dir,
            test_size: 0.2,
            seed: 42,
            n_trees: 100,
            max_depth: None,
        }
    }
}

/// Outcome of a completed training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub training_examples: usize,
    pub test_examples: usize,
    pub evaluation: EvaluationReport,
    pub artifacts_dir: PathBuf,
}

/// Run the pipeline: load, split, fit, evaluate, persist.
///
/// Any failure aborts the run before anything is written; artifacts only
/// appear once both fits and the evaluation have succeeded.
pub fn train(config: &TrainingConfig) -> Result<TrainingReport> {
    info!(dataset = %config.dataset_path.display(), "loading dataset");
    let dataset = Dataset::load_csv(&config.dataset_path)?;
    info!(examples = dataset.len(), "dataset loaded");

    let (train_set, test_set) =
        stratified_split(&dataset.examples, config.test_size, config.seed)?;
    info!(train = train_set.len(), test = test_set.len(), "dataset split");

    let train_features: Vec<Vec<f64>> = train_set
        .iter()
        .map(|example| example.features.to_f64_array().to_vec())
        .collect();
    let train_labels: Vec<i8> = train_set.iter().map(|example| example.label).collect();
    let test_features: Vec<Vec<f64>> = test_set
        .iter()
        .map(|example| example.features.to_f64_array().to_vec())
        .collect();
    let test_labels: Vec<i8> = test_set.iter().map(|example| example.label).collect();

    // The scaler sees only the training split; the held-out rows go through
    // the already-fitted transform.
    let mut scaler = StandardScaler::new();
    scaler.fit(&train_features)?;
    let train_scaled = scaler.transform_matrix(&train_features)?;
    let test_scaled = scaler.transform_matrix(&test_features)?;

    let mut forest = RandomForestClassifier::new(ForestConfig {
        n_trees: config.n_trees,
        max_depth: config.max_depth,
        min_samples_split: 2,
        seed: config.seed,
    });
    info!(trees = config.n_trees, "fitting random forest");
    forest.fit(&train_scaled, &train_labels)?;

    let predictions: Vec<i8> = test_scaled
        .iter()
        .map(|row| forest.predict(row))
        .collect::<Result<_>>()?;
    let evaluation = EvaluationReport::compute(&predictions, &test_labels);
    info!(accuracy = evaluation.accuracy, "held-out evaluation complete");

    let metadata = ModelMetadata {
        name: "phishguard".to_string(),
        version: crate::VERSION.to_string(),
        trained_at: chrono::Utc::now(),
        training_examples: train_set.len(),
        test_examples: test_set.len(),
        validation_metrics: [
            ("accuracy".to_string(), evaluation.accuracy),
            ("phishing_precision".to_string(), evaluation.phishing.precision),
            ("phishing_recall".to_string(), evaluation.phishing.recall),
            ("phishing_f1".to_string(), evaluation.phishing.f1),
            (
                "legitimate_precision".to_string(),
                evaluation.legitimate.precision,
            ),
            ("legitimate_recall".to_string(), evaluation.legitimate.recall),
            ("legitimate_f1".to_string(), evaluation.legitimate.f1),
        ]
        .into_iter()
        .collect(),
    };

    save_artifacts(&config.artifacts_dir, &scaler, &forest, &metadata)?;
    info!(dir = %config.artifacts_dir.display(), "artifacts persisted");

    Ok(TrainingReport {
        training_examples: train_set.len(),
        test_examples: test_set.len(),
        evaluation,
        artifacts_dir: config.artifacts_dir.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::features::vector::{FEATURE_COLUMNS, FEATURE_COUNT};
    use crate::scorer::{Label, Scorer};
    use crate::training::dataset::LABEL_COLUMN;

    /// A clean synthetic dataset where `uses_shortener` and `url_length`
    /// jointly determine the label.
    fn write_dataset(path: &std::path::Path, rows_per_class: usize) {
        let mut csv = format!("{},{}\n", FEATURE_COLUMNS.join(","), LABEL_COLUMN);
        for index in 0..rows_per_class {
            let mut phishy = [1i8; FEATURE_COUNT];
            phishy[2] = -1; // uses_shortener
            phishy[1] = if index % 2 == 0 { 1 } else { 0 }; // url_length
            let cells: Vec<String> = phishy.iter().map(|v| v.to_string()).collect();
            csv.push_str(&format!("{},-1\n", cells.join(",")));

            let mut benign = [1i8; FEATURE_COUNT];
            benign[1] = -1;
            let cells: Vec<String> = benign.iter().map(|v| v.to_string()).collect();
            csv.push_str(&format!("{},1\n", cells.join(",")));
        }
        fs::write(path, csv).unwrap();
    }

    fn config(dir: &std::path::Path, seed: u64) -> TrainingConfig {
        TrainingConfig {
            dataset_path: dir.join("dataset.csv"),
            artifacts_dir: dir.join("models"),
            test_size: 0.2,
            seed,
            n_trees: 20,
            max_depth: None,
        }
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(&dir.path().join("dataset.csv"), 40);

        let report = train(&config(dir.path(), 42)).unwrap();
        assert_eq!(report.training_examples + report.test_examples, 80);
        assert!(report.evaluation.accuracy >= 0.9);

        // The persisted pair loads and separates the two training modes.
        let scorer = Scorer::load(&dir.path().join("models")).unwrap();
        let mut shortener = crate::features::vector::FeatureVector::from_array([1; FEATURE_COUNT]);
        shortener.uses_shortener = -1;
        assert_eq!(scorer.classify(&shortener).unwrap().label, Label::Phishing);

        let mut benign = crate::features::vector::FeatureVector::from_array([1; FEATURE_COUNT]);
        benign.url_length = -1;
        assert_eq!(scorer.classify(&benign).unwrap().label, Label::Legitimate);
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(&dir.path().join("dataset.csv"), 30);

        let first = train(&config(dir.path(), 42)).unwrap();
        let first_scaler = fs::read_to_string(dir.path().join("models/scaler.json")).unwrap();

        let second = train(&config(dir.path(), 42)).unwrap();
        let second_scaler = fs::read_to_string(dir.path().join("models/scaler.json")).unwrap();

        assert_eq!(first_scaler, second_scaler);
        assert_eq!(first.evaluation, second.evaluation);
    }

    #[test]
    fn test_missing_dataset_aborts_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let result = train(&config(dir.path(), 42));
        assert!(result.is_err());
        assert!(!dir.path().join("models").exists());
    }

    #[test]
    fn test_bad_dataset_aborts_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dataset.csv"), "not,a,real,header\n1,2,3,4\n").unwrap();

        assert!(train(&config(dir.path(), 42)).is_err());
        assert!(!dir.path().join("models").exists());
    }
}
