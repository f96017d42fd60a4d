//! URL feature extraction.
//!
//! This module maps a raw URL string to the fixed 11-dimensional
//! [`FeatureVector`](vector::FeatureVector) the trained scorer consumes.
//! Extraction is a pure function of the URL string: no I/O, no randomness,
//! and it never fails (malformed input degrades to the default vector).

pub mod domain;
pub mod extractor;
pub mod vector;

pub use domain::{DomainParts, DomainSplitter, PslSplitter};
pub use extractor::{ExtractorConfig, UrlFeatureExtractor};
pub use vector::{FEATURE_COLUMNS, FeatureVector};
