//! # Phishguard
//!
//! Lexical phishing URL detection for Rust.
//!
//! A URL is mapped to a fixed 11-dimensional feature vector by a
//! deterministic, total extractor, standardized with a fitted scaler, and
//! voted through a fitted random forest to produce a Phishing/Legitimate
//! verdict with a confidence estimate.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Deterministic, seedable training pipeline
//! - Public-suffix-aware hostname decomposition
//! - JSON model artifacts with schema checking
//! - CLI and HTTP serving surfaces

pub mod cli;
pub mod error;
pub mod features;
pub mod model;
pub mod scorer;
pub mod server;
pub mod training;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
