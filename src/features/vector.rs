//! The fixed-shape feature vector consumed by the scorer.

use serde::{Deserialize, Serialize};

use crate::error::{PhishguardError, Result};

/// Number of features in the vector.
pub const FEATURE_COUNT: usize = 11;

/// The feature column names, in the exact order the classifier was trained
/// on.
///
/// This constant is the single source of truth for column order: the
/// extractor, the dataset loader, the training pipeline, and the scorer all
/// serialize through it. The scorer is order-sensitive and has no notion of
/// field names, so any flat-array serialization must preserve this order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "has_ip_address",
    "url_length",
    "uses_shortener",
    "has_at_symbol",
    "has_double_slash_redirect",
    "has_prefix_suffix_hyphen",
    "subdomain_complexity",
    "https_in_domain_token",
    "nonstandard_port",
    "submits_to_email",
    "abnormal_structure",
];

/// An ordered record of 11 signed categorical URL features.
///
/// Each field takes values in {-1, 0, 1}. Nine fields are binary {-1, 1};
/// `url_length` and `subdomain_complexity` are ternary {-1, 0, 1}.
///
/// Sign convention (trained contract, do not "fix"): for most fields 1 means
/// benign/absent and -1 means suspicious/present, but `url_length` and
/// `subdomain_complexity` invert this, with 1 as the most suspicious value
/// and -1 as benign.
///
/// `Default` yields the all-zero vector, which is also what extraction
/// degrades to on unparsable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Hostname is a literal dotted-quad IPv4 address (-1) or not (1).
    pub has_ip_address: i8,
    /// URL length bucket: short (-1), medium 54-75 (0), long >75 (1).
    pub url_length: i8,
    /// Hostname matches a known URL-shortener domain (-1) or not (1).
    pub uses_shortener: i8,
    /// URL contains "@" (-1) or not (1).
    pub has_at_symbol: i8,
    /// Last "//" occurs after position 7 (-1) or not (1).
    pub has_double_slash_redirect: i8,
    /// Registered domain label contains "-" (-1) or not (1).
    pub has_prefix_suffix_hyphen: i8,
    /// Subdomain depth: none (-1), up to two labels (0), more (1).
    pub subdomain_complexity: i8,
    /// Literal "https" appears in the hostname (-1) or not (1).
    pub https_in_domain_token: i8,
    /// Explicit port present and not 80/443 (-1) or standard (1).
    pub nonstandard_port: i8,
    /// URL contains "mailto:" (-1) or not (1).
    pub submits_to_email: i8,
    /// Registered domain does not occur within the hostname (-1) or does (1).
    pub abnormal_structure: i8,
}

impl FeatureVector {
    /// Serialize to a flat array in [`FEATURE_COLUMNS`] order.
    pub fn to_array(&self) -> [i8; FEATURE_COUNT] {
        [
            self.has_ip_address,
            self.url_length,
            self.uses_shortener,
            self.has_at_symbol,
            self.has_double_slash_redirect,
            self.has_prefix_suffix_hyphen,
            self.subdomain_complexity,
            self.https_in_domain_token,
            self.nonstandard_port,
            self.submits_to_email,
            self.abnormal_structure,
        ]
    }

    /// Reconstruct from a flat array in [`FEATURE_COLUMNS`] order.
    pub fn from_array(values: [i8; FEATURE_COUNT]) -> Self {
        Self {
            has_ip_address: values[0],
            url_length: values[1],
            uses_shortener: values[2],
            has_at_symbol: values[3],
            has_double_slash_redirect: values[4],
            has_prefix_suffix_hyphen: values[5],
            subdomain_complexity: values[6],
            https_in_domain_token: values[7],
            nonstandard_port: values[8],
            submits_to_email: values[9],
            abnormal_structure: values[10],
        }
    }

    /// The vector as `f64` values, the representation the scaler and the
    /// forest operate on.
    pub fn to_f64_array(&self) -> [f64; FEATURE_COUNT] {
        self.to_array().map(f64::from)
    }

    /// Check that every field lies in its legal domain.
    ///
    /// Binary fields must be -1 or 1; `url_length` and
    /// `subdomain_complexity` may also be 0. Used at the manual-input
    /// boundary; extraction output is valid by construction except for the
    /// degraded all-zero vector.
    pub fn validate(&self) -> Result<()> {
        let values = self.to_array();
        for (idx, &value) in values.iter().enumerate() {
            let ternary = matches!(FEATURE_COLUMNS[idx], "url_length" | "subdomain_complexity");
            let ok = if ternary {
                (-1..=1).contains(&value)
            } else {
                value == -1 || value == 1
            };
            if !ok {
                return Err(PhishguardError::invalid_argument(format!(
                    "feature '{}' has out-of-domain value {}",
                    FEATURE_COLUMNS[idx], value
                )));
            }
        }
        Ok(())
    }
}
