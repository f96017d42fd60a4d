//! Serving-time classification over loaded model artifacts.
//!
//! A [`Scorer`] is built once at process start from the persisted
//! scaler/classifier pair and is read-only afterwards: classification is a
//! pure function of the input vector and the loaded artifacts, so shared
//! references need no locking.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PhishguardError, Result};
use crate::features::vector::FeatureVector;
use crate::model::artifacts::{ModelMetadata, load_artifacts};
use crate::model::forest::RandomForestClassifier;
use crate::model::scaler::StandardScaler;

/// Classification outcome for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Phishing,
    Legitimate,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Phishing => write!(f, "Phishing"),
            Label::Legitimate => write!(f, "Legitimate"),
        }
    }
}

/// A classification together with the model's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: Label,
    /// Max class probability, in [0, 1].
    pub confidence: f64,
}

/// The immutable fitted pair used at inference time.
#[derive(Debug, Clone)]
pub struct Scorer {
    scaler: StandardScaler,
    forest: RandomForestClassifier,
    metadata: ModelMetadata,
}

impl Scorer {
    /// Assemble a scorer from already-fitted components.
    pub fn new(
        scaler: StandardScaler,
        forest: RandomForestClassifier,
        metadata: ModelMetadata,
    ) -> Self {
        Self {
            scaler,
            forest,
            metadata,
        }
    }

    /// Load the persisted artifacts from `dir`.
    ///
    /// Fails on missing or corrupt blobs, on a format-version mismatch, and
    /// on a feature-schema mismatch; a scorer that loads is ready to serve.
    pub fn load(dir: &Path) -> Result<Self> {
        let (scaler, forest, metadata) = load_artifacts(dir)?;
        let scorer = Self::new(scaler, forest, metadata);
        if !scorer.is_ready() {
            return Err(PhishguardError::model(
                "loaded artifacts are not fitted",
            ));
        }
        Ok(scorer)
    }

    /// Whether both halves of the pair are fitted and usable.
    pub fn is_ready(&self) -> bool {
        self.scaler.is_fitted() && self.forest.is_trained()
    }

    /// Classify a feature vector.
    ///
    /// Deterministic: the same vector against the same artifacts always
    /// yields the same verdict.
    pub fn classify(&self, vector: &FeatureVector) -> Result<Verdict> {
        let standardized = self.scaler.transform(&vector.to_f64_array())?;
        let prediction = self.forest.predict(&standardized)?;
        let distribution = self.forest.predict_proba(&standardized)?;

        let label = if prediction == 1 {
            Label::Legitimate
        } else {
            Label::Phishing
        };
        let confidence = distribution[0].max(distribution[1]);

        Ok(Verdict { label, confidence })
    }

    /// Metadata recorded when the artifacts were trained.
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
