//! Random forest binary classifier.
//!
//! An ensemble of CART-style decision trees fitted on bootstrap samples
//! with per-split feature subsampling. Training is sequential and fully
//! seeded, so a fixed seed and dataset reproduce the forest bit for bit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{PhishguardError, Result};

/// The two classes, in probability-array order: phishing (-1), legitimate (1).
pub const CLASSES: [i8; 2] = [-1, 1];

/// Minimum number of training rows required to fit the forest.
const MIN_TRAINING_ROWS: usize = 10;

/// Hyperparameters for the random forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Maximum tree depth; `None` grows trees until purity.
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node.
    pub min_samples_split: usize,
    /// Master seed for bootstrap and feature subsampling.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

/// A single fitted decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DecisionTree {
    root: TreeNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    /// Terminal node carrying the class distribution of its training rows.
    Leaf { distribution: [f64; 2] },
    /// Internal split: rows with `feature <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl DecisionTree {
    fn fit(
        features: &[Vec<f64>],
        labels: &[i8],
        indices: &[usize],
        n_candidate_features: usize,
        config: &ForestConfig,
        rng: &mut StdRng,
    ) -> Self {
        let root = build_node(features, labels, indices, 0, n_candidate_features, config, rng);
        Self { root }
    }

    fn predict_proba(&self, row: &[f64]) -> [f64; 2] {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { distribution } => return *distribution,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

/// Recursively build a tree node over the rows selected by `indices`.
fn build_node(
    features: &[Vec<f64>],
    labels: &[i8],
    indices: &[usize],
    depth: usize,
    n_candidate_features: usize,
    config: &ForestConfig,
    rng: &mut StdRng,
) -> TreeNode {
    let distribution = class_distribution(labels, indices);
    let pure = distribution[0] == 0.0 || distribution[1] == 0.0;
    let depth_exhausted = config.max_depth.is_some_and(|max| depth >= max);

    if pure || depth_exhausted || indices.len() < config.min_samples_split {
        return TreeNode::Leaf { distribution };
    }

    match find_best_split(features, labels, indices, n_candidate_features, rng) {
        Some((feature, threshold, left_indices, right_indices)) => {
            let left = build_node(
                features,
                labels,
                &left_indices,
                depth + 1,
                n_candidate_features,
                config,
                rng,
            );
            let right = build_node(
                features,
                labels,
                &right_indices,
                depth + 1,
                n_candidate_features,
                config,
                rng,
            );
            TreeNode::Split {
                feature,
                threshold,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
        None => TreeNode::Leaf { distribution },
    }
}

/// Find the Gini-optimal split over a random subset of features.
///
/// Thresholds are midpoints between consecutive distinct sorted values, so
/// both children are always non-empty. Returns `None` when no split reduces
/// impurity.
fn find_best_split(
    features: &[Vec<f64>],
    labels: &[i8],
    indices: &[usize],
    n_candidate_features: usize,
    rng: &mut StdRng,
) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
    let n_features = features[indices[0]].len();
    let parent_gini = gini(labels, indices);

    let candidates = rand::seq::index::sample(rng, n_features, n_candidate_features.min(n_features));

    let mut best_gain = 1e-12;
    let mut best_split = None;

    for feature in candidates {
        let mut values: Vec<(f64, usize)> = indices
            .iter()
            .map(|&index| (features[index][feature], index))
            .collect();
        values.sort_by(|a, b| a.0.total_cmp(&b.0));

        for position in 1..values.len() {
            // Only split between distinct values so the threshold
            // comparison partitions exactly as the sort did.
            if values[position - 1].0 == values[position].0 {
                continue;
            }
            let threshold = (values[position - 1].0 + values[position].0) / 2.0;

            let left_indices: Vec<usize> =
                values[..position].iter().map(|&(_, index)| index).collect();
            let right_indices: Vec<usize> =
                values[position..].iter().map(|&(_, index)| index).collect();

            let weight_left = left_indices.len() as f64 / indices.len() as f64;
            let weight_right = right_indices.len() as f64 / indices.len() as f64;
            let gain = parent_gini
                - weight_left * gini(labels, &left_indices)
                - weight_right * gini(labels, &right_indices);

            if gain > best_gain {
                best_gain = gain;
                best_split = Some((feature, threshold, left_indices, right_indices));
            }
        }
    }

    best_split
}

/// Gini impurity of the rows selected by `indices`.
fn gini(labels: &[i8], indices: &[usize]) -> f64 {
    let distribution = class_distribution(labels, indices);
    1.0 - distribution[0] * distribution[0] - distribution[1] * distribution[1]
}

/// Class fractions (phishing, legitimate) among the selected rows.
fn class_distribution(labels: &[i8], indices: &[usize]) -> [f64; 2] {
    let phishing = indices.iter().filter(|&&index| labels[index] == -1).count();
    let total = indices.len() as f64;
    [phishing as f64 / total, (indices.len() - phishing) as f64 / total]
}

/// Random forest over standardized feature rows with labels in {-1, 1}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForestClassifier {
    /// Create an untrained forest with the given hyperparameters.
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    /// Fit the ensemble on the training rows.
    ///
    /// Each tree sees a seeded bootstrap sample and evaluates ⌈√k⌉ random
    /// feature candidates per split.
    pub fn fit(&mut self, features: &[Vec<f64>], labels: &[i8]) -> Result<()> {
        if features.len() != labels.len() {
            return Err(PhishguardError::training(format!(
                "feature rows ({}) and labels ({}) differ in length",
                features.len(),
                labels.len()
            )));
        }
        if features.len() < MIN_TRAINING_ROWS {
            return Err(PhishguardError::training(format!(
                "need at least {MIN_TRAINING_ROWS} training rows, got {}",
                features.len()
            )));
        }
        let width = features[0].len();
        if width == 0 || features.iter().any(|row| row.len() != width) {
            return Err(PhishguardError::training(
                "training rows must be non-empty and of equal width",
            ));
        }
        if let Some(bad) = labels.iter().find(|label| !CLASSES.contains(label)) {
            return Err(PhishguardError::training(format!(
                "labels must be -1 or 1, got {bad}"
            )));
        }

        let n_candidate_features = (width as f64).sqrt().ceil() as usize;
        let n_rows = features.len();
        let mut master = StdRng::seed_from_u64(self.config.seed);

        let mut trees = Vec::with_capacity(self.config.n_trees);
        for _ in 0..self.config.n_trees {
            let mut tree_rng = StdRng::seed_from_u64(master.random());
            let bootstrap: Vec<usize> = (0..n_rows)
                .map(|_| tree_rng.random_range(0..n_rows))
                .collect();
            trees.push(DecisionTree::fit(
                features,
                labels,
                &bootstrap,
                n_candidate_features,
                &self.config,
                &mut tree_rng,
            ));
        }

        self.trees = trees;
        self.n_features = width;
        Ok(())
    }

    /// Averaged class-probability distribution (phishing, legitimate).
    pub fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2]> {
        if !self.is_trained() {
            return Err(PhishguardError::invalid_operation(
                "forest has not been trained",
            ));
        }
        if row.len() != self.n_features {
            return Err(PhishguardError::invalid_argument(format!(
                "expected {} features, got {}",
                self.n_features,
                row.len()
            )));
        }

        let mut totals = [0.0; 2];
        for tree in &self.trees {
            let distribution = tree.predict_proba(row);
            totals[0] += distribution[0];
            totals[1] += distribution[1];
        }
        let count = self.trees.len() as f64;
        Ok([totals[0] / count, totals[1] / count])
    }

    /// Predicted class in {-1, 1}.
    pub fn predict(&self, row: &[f64]) -> Result<i8> {
        let distribution = self.predict_proba(row)?;
        Ok(if distribution[1] > distribution[0] {
            CLASSES[1]
        } else {
            CLASSES[0]
        })
    }

    /// Whether the forest has been fitted.
    pub fn is_trained(&self) -> bool {
        !self.trees.is_empty()
    }

    /// The hyperparameters the forest was built with.
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Number of feature columns the forest was trained on.
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}
