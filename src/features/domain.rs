//! Public-suffix-aware hostname decomposition.
//!
//! Splitting a hostname into subdomain, registered domain label, and public
//! suffix requires the public-suffix list (a naive dot-split mishandles
//! multi-part suffixes like "co.uk"), so the capability is injected behind
//! the [`DomainSplitter`] trait. [`PslSplitter`] is the default
//! implementation, backed by the `psl` crate's compiled-in suffix list.

use std::sync::OnceLock;

use regex::Regex;

/// A hostname decomposed into its registration components.
///
/// For `mail.example.co.uk`: subdomain `mail`, domain `example`, suffix
/// `co.uk`. IPv4-literal hostnames carry the whole literal in `domain` with
/// empty subdomain and suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    /// Labels left of the registered domain, joined by dots. Empty when the
    /// hostname is exactly the registrable domain.
    pub subdomain: String,
    /// The registered domain label, without the public suffix.
    pub domain: String,
    /// The public suffix under which the domain is registered.
    pub suffix: String,
}

/// Capability for splitting hostnames on public-suffix boundaries.
pub trait DomainSplitter: Send + Sync {
    /// Decompose a hostname. Must be total: unrecognized hostnames fall back
    /// to treating the whole input as the domain label.
    fn split(&self, hostname: &str) -> DomainParts;
}

/// Whether a hostname is shaped like a dotted-quad IPv4 literal.
///
/// Deliberately does not validate octet ranges; four dot-separated groups of
/// 1-3 digits qualify. This shape check is part of the trained feature
/// contract.
pub fn is_ipv4_literal(hostname: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").expect("static pattern compiles"))
        .is_match(hostname)
}

/// Default [`DomainSplitter`] backed by the public-suffix list.
#[derive(Debug, Default, Clone)]
pub struct PslSplitter;

impl PslSplitter {
    /// Create a new splitter.
    pub fn new() -> Self {
        Self
    }
}

impl DomainSplitter for PslSplitter {
    fn split(&self, hostname: &str) -> DomainParts {
        // IPv4 literals have no registration structure; keep the literal
        // whole so substring checks against the hostname still hold.
        if is_ipv4_literal(hostname) {
            return DomainParts {
                subdomain: String::new(),
                domain: hostname.to_string(),
                suffix: String::new(),
            };
        }

        match psl::domain(hostname.as_bytes()) {
            Some(registrable) => {
                let registrable_str =
                    String::from_utf8_lossy(registrable.as_bytes()).into_owned();
                let suffix =
                    String::from_utf8_lossy(registrable.suffix().as_bytes()).into_owned();

                let domain = registrable_str
                    .strip_suffix(&suffix)
                    .map(|d| d.trim_end_matches('.').to_string())
                    .unwrap_or_else(|| registrable_str.clone());

                let subdomain = hostname
                    .strip_suffix(&registrable_str)
                    .map(|s| s.trim_end_matches('.').to_string())
                    .unwrap_or_default();

                DomainParts {
                    subdomain,
                    domain,
                    suffix,
                }
            }
            // Single-label hosts and other names without a registrable
            // domain: the whole hostname stands in as the domain label.
            None => DomainParts {
                subdomain: String::new(),
                domain: hostname.to_string(),
                suffix: String::new(),
            },
        }
    }
}
