//! Held-out evaluation metrics.

use serde::{Deserialize, Serialize};

/// Fraction of predictions matching the ground-truth labels.
pub fn accuracy(predictions: &[i8], labels: &[i8]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let correct = predictions
        .iter()
        .zip(labels)
        .filter(|(prediction, label)| prediction == label)
        .count();
    correct as f64 / predictions.len() as f64
}

/// Precision/recall/F1 for one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of ground-truth examples of this class.
    pub support: usize,
}

impl ClassMetrics {
    fn compute(predictions: &[i8], labels: &[i8], class: i8) -> Self {
        let true_positives = predictions
            .iter()
            .zip(labels)
            .filter(|&(&prediction, &label)| prediction == class && label == class)
            .count() as f64;
        let predicted = predictions.iter().filter(|&&p| p == class).count() as f64;
        let support = labels.iter().filter(|&&l| l == class).count();

        let precision = if predicted > 0.0 {
            true_positives / predicted
        } else {
            0.0
        };
        let recall = if support > 0 {
            true_positives / support as f64
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            precision,
            recall,
            f1,
            support,
        }
    }
}

/// Held-out evaluation: accuracy plus per-class breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub phishing: ClassMetrics,
    pub legitimate: ClassMetrics,
}

impl EvaluationReport {
    /// Compute the report from aligned predictions and labels.
    pub fn compute(predictions: &[i8], labels: &[i8]) -> Self {
        Self {
            accuracy: accuracy(predictions, labels),
            phishing: ClassMetrics::compute(predictions, labels, -1),
            legitimate: ClassMetrics::compute(predictions, labels, 1),
        }
    }
}
