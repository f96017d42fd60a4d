//! Feature-wise standardization (zero mean, unit variance).

use serde::{Deserialize, Serialize};

use crate::error::{PhishguardError, Result};

/// Standardizes each feature column to zero mean and unit variance.
///
/// Statistics are fitted on the training split only and then applied
/// unchanged to every later input, so the held-out evaluation and the
/// serving path see the same transform with no leakage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column means from the fitting data.
    means: Vec<f64>,
    /// Per-column standard deviations; zero-variance columns are stored as
    /// 1.0 so they pass through unscaled.
    stds: Vec<f64>,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    /// Create an unfitted scaler.
    pub fn new() -> Self {
        Self {
            means: Vec::new(),
            stds: Vec::new(),
        }
    }

    /// Fit the per-column statistics on the given rows.
    ///
    /// Uses the population standard deviation, matching the convention the
    /// persisted artifacts were produced with.
    pub fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()> {
        let first = rows
            .first()
            .ok_or_else(|| PhishguardError::training("cannot fit scaler on empty data"))?;
        let width = first.len();
        if width == 0 {
            return Err(PhishguardError::training("cannot fit scaler on zero-width rows"));
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(PhishguardError::training("inconsistent row widths in scaler input"));
        }

        let count = rows.len() as f64;
        let mut means = vec![0.0; width];
        for row in rows {
            for (mean, value) in means.iter_mut().zip(row) {
                *mean += value;
            }
        }
        for mean in &mut means {
            *mean /= count;
        }

        let mut stds = vec![0.0; width];
        for row in rows {
            for ((std, value), mean) in stds.iter_mut().zip(row).zip(&means) {
                *std += (value - mean).powi(2);
            }
        }
        for std in &mut stds {
            *std = (*std / count).sqrt();
            if *std == 0.0 {
                *std = 1.0;
            }
        }

        self.means = means;
        self.stds = stds;
        Ok(())
    }

    /// Standardize a single row with the fitted statistics.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(PhishguardError::invalid_operation(
                "scaler has not been fitted",
            ));
        }
        if row.len() != self.means.len() {
            return Err(PhishguardError::invalid_argument(format!(
                "expected {} features, got {}",
                self.means.len(),
                row.len()
            )));
        }

        Ok(row
            .iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(value, (mean, std))| (value - mean) / std)
            .collect())
    }

    /// Standardize a batch of rows.
    pub fn transform_matrix(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        rows.iter().map(|row| self.transform(row)).collect()
    }

    /// Whether `fit` has been called.
    pub fn is_fitted(&self) -> bool {
        !self.means.is_empty()
    }

    /// Number of feature columns the scaler was fitted on.
    pub fn n_features(&self) -> usize {
        self.means.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_and_transform() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 10.0], vec![5.0, 10.0]];
        let mut scaler = StandardScaler::new();
        scaler.fit(&rows).unwrap();

        // Column 0: mean 3, population std sqrt(8/3).
        let std0 = (8.0f64 / 3.0).sqrt();
        let transformed = scaler.transform(&[1.0, 10.0]).unwrap();
        assert!((transformed[0] - (1.0 - 3.0) / std0).abs() < 1e-12);
        // Zero-variance column passes through centered but unscaled.
        assert!((transformed[1] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_transformed_columns_have_zero_mean() {
        let rows = vec![
            vec![2.0, -1.0],
            vec![4.0, 1.0],
            vec![6.0, 1.0],
            vec![8.0, -1.0],
        ];
        let mut scaler = StandardScaler::new();
        scaler.fit(&rows).unwrap();
        let transformed = scaler.transform_matrix(&rows).unwrap();

        for column in 0..2 {
            let mean: f64 =
                transformed.iter().map(|row| row[column]).sum::<f64>() / rows.len() as f64;
            assert!(mean.abs() < 1e-12);
        }
    }

    #[test]
    fn test_unfitted_transform_is_an_error() {
        let scaler = StandardScaler::new();
        assert!(scaler.transform(&[1.0]).is_err());
        assert!(!scaler.is_fitted());
    }

    #[test]
    fn test_width_mismatch_is_an_error() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&[vec![1.0, 2.0]]).unwrap();
        assert!(scaler.transform(&[1.0]).is_err());
    }

    #[test]
    fn test_fit_on_empty_data_is_an_error() {
        let mut scaler = StandardScaler::new();
        assert!(scaler.fit(&[]).is_err());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&[vec![1.0, 5.0], vec![3.0, 7.0]]).unwrap();

        let json = serde_json::to_string(&scaler).unwrap();
        let restored: StandardScaler = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, scaler);
    }
}
