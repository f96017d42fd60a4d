//! Loading the labeled feature dataset.
//!
//! The dataset is a CSV file with one row per labeled example. The header
//! must contain the 11 feature columns (exact names from
//! [`FEATURE_COLUMNS`]) plus a `Result` label column; header cells may
//! carry stray whitespace, and any other columns are ignored. Cells are
//! bare integers, so no quoting rules apply.

use std::fs;
use std::path::Path;

use crate::error::{PhishguardError, Result};
use crate::features::vector::{FEATURE_COLUMNS, FEATURE_COUNT, FeatureVector};

/// Name of the ground-truth label column.
pub const LABEL_COLUMN: &str = "Result";

/// A feature vector with its ground-truth label (-1 phishing, 1 legitimate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingExample {
    pub features: FeatureVector,
    pub label: i8,
}

/// An ordered collection of training examples.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub examples: Vec<TrainingExample>,
}

impl Dataset {
    /// Load a dataset from a CSV file.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|error| {
            PhishguardError::dataset(format!("could not read {}: {error}", path.display()))
        })?;
        Self::from_csv_str(&content)
    }

    /// Parse a dataset from CSV text.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut lines = content.lines();
        let header_line = lines
            .next()
            .ok_or_else(|| PhishguardError::dataset("dataset is empty"))?;
        let header: Vec<&str> = header_line.split(',').map(str::trim).collect();

        let mut feature_indices = [0usize; FEATURE_COUNT];
        for (slot, name) in feature_indices.iter_mut().zip(FEATURE_COLUMNS) {
            *slot = header
                .iter()
                .position(|&column| column == name)
                .ok_or_else(|| {
                    PhishguardError::dataset(format!("missing feature column '{name}'"))
                })?;
        }
        let label_index = header
            .iter()
            .position(|&column| column == LABEL_COLUMN)
            .ok_or_else(|| {
                PhishguardError::dataset(format!("missing label column '{LABEL_COLUMN}'"))
            })?;

        let mut examples = Vec::new();
        for (line_number, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row_number = line_number + 2; // header is line 1
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();

            let mut values = [0i8; FEATURE_COUNT];
            for (value, &index) in values.iter_mut().zip(&feature_indices) {
                *value = parse_cell(&cells, index, row_number)?;
            }
            let label = parse_cell(&cells, label_index, row_number)?;
            if label != -1 && label != 1 {
                return Err(PhishguardError::dataset(format!(
                    "row {row_number}: label must be -1 or 1, got {label}"
                )));
            }

            examples.push(TrainingExample {
                features: FeatureVector::from_array(values),
                label,
            });
        }

        Ok(Self { examples })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Whether the dataset has no examples.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// The feature rows as `f64` values, in [`FEATURE_COLUMNS`] order.
    pub fn feature_matrix(&self) -> Vec<Vec<f64>> {
        self.examples
            .iter()
            .map(|example| example.features.to_f64_array().to_vec())
            .collect()
    }

    /// The labels, aligned with [`Dataset::feature_matrix`].
    pub fn labels(&self) -> Vec<i8> {
        self.examples.iter().map(|example| example.label).collect()
    }
}

fn parse_cell(cells: &[&str], index: usize, row_number: usize) -> Result<i8> {
    let cell = cells.get(index).ok_or_else(|| {
        PhishguardError::dataset(format!(
            "row {row_number}: expected at least {} columns, got {}",
            index + 1,
            cells.len()
        ))
    })?;
    cell.parse::<i8>().map_err(|_| {
        PhishguardError::dataset(format!(
            "row {row_number}: cell '{cell}' is not a signed integer"
        ))
    })
}
