//! Lexical feature extraction from raw URL strings.

use tracing::warn;
use url::Url;

use crate::features::domain::{DomainSplitter, PslSplitter, is_ipv4_literal};
use crate::features::vector::FeatureVector;

/// Configuration for the feature extractor.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Hostnames matching any of these substrings are flagged as URL
    /// shorteners.
    pub shortener_domains: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            shortener_domains: vec![
                "bit.ly".to_string(),
                "goo.gl".to_string(),
                "t.co".to_string(),
            ],
        }
    }
}

/// Maps a raw URL string to a [`FeatureVector`].
///
/// Extraction is total: any string input produces a vector. Unparsable
/// input degrades to [`FeatureVector::default`] with a logged warning
/// rather than an error.
///
/// The per-field rules and their sign conventions are the contract the
/// persisted classifier was trained against; see [`FeatureVector`] for the
/// convention and its deliberate asymmetry.
pub struct UrlFeatureExtractor {
    config: ExtractorConfig,
    splitter: Box<dyn DomainSplitter>,
}

impl Default for UrlFeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlFeatureExtractor {
    /// Create an extractor with the default configuration and the
    /// public-suffix-list splitter.
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            config,
            splitter: Box::new(PslSplitter::new()),
        }
    }

    /// Create an extractor with a custom domain splitter.
    pub fn with_splitter(config: ExtractorConfig, splitter: Box<dyn DomainSplitter>) -> Self {
        Self { config, splitter }
    }

    /// Extract the feature vector for a URL.
    ///
    /// The URL is normalized first: inputs without an `http://`, `https://`,
    /// or `ftp://` prefix get `http://` prepended, and every whole-string
    /// feature (length, `@`, `//`, `mailto:`) is computed on the normalized
    /// form.
    pub fn extract(&self, url: &str) -> FeatureVector {
        let normalized = normalize_scheme(url);

        let parsed = match Url::parse(&normalized) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(url, %error, "could not parse URL, returning default feature vector");
                return FeatureVector::default();
            }
        };

        let hostname = parsed.host_str().unwrap_or("");
        let parts = self.splitter.split(hostname);

        let subdomain_complexity = if parts.subdomain.is_empty() {
            -1
        } else if parts.subdomain.split('.').count() <= 2 {
            0
        } else {
            1
        };

        FeatureVector {
            has_ip_address: if is_ipv4_literal(hostname) { -1 } else { 1 },
            url_length: match normalized.len() {
                54..=75 => 0,
                length if length > 75 => 1,
                _ => -1,
            },
            uses_shortener: if self
                .config
                .shortener_domains
                .iter()
                .any(|shortener| hostname.contains(shortener.as_str()))
            {
                -1
            } else {
                1
            },
            has_at_symbol: if normalized.contains('@') { -1 } else { 1 },
            // 7 is the length of "http://"; a "//" past that point marks a
            // redirect-style URL.
            has_double_slash_redirect: match normalized.rfind("//") {
                Some(index) if index > 7 => -1,
                _ => 1,
            },
            has_prefix_suffix_hyphen: if parts.domain.contains('-') { -1 } else { 1 },
            subdomain_complexity,
            // The hostname, not the scheme: "https://" in front of a clean
            // hostname stays benign.
            https_in_domain_token: if hostname.contains("https") { -1 } else { 1 },
            nonstandard_port: match parsed.port() {
                Some(port) if port != 80 && port != 443 => -1,
                _ => 1,
            },
            submits_to_email: if normalized.contains("mailto:") { -1 } else { 1 },
            abnormal_structure: if hostname.contains(parts.domain.as_str()) {
                1
            } else {
                -1
            },
        }
    }
}

/// Prepend `http://` when the input lacks a recognized scheme prefix.
fn normalize_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("ftp://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}
