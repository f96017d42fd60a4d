//! Command line argument parsing for the phishguard CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Phishguard - lexical phishing URL detection
#[derive(Parser, Debug, Clone)]
#[command(name = "phishguard")]
#[command(about = "Classify URLs as phishing or legitimate from lexical features")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PhishguardArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PhishguardArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train the scaler/classifier pair from a labeled dataset
    Train(TrainArgs),

    /// Classify a URL against persisted artifacts
    Predict(PredictArgs),

    /// Extract the feature vector for a URL
    Extract(ExtractArgs),

    /// Show metadata of persisted artifacts
    Stats(StatsArgs),

    /// Run the HTTP inference service
    Serve(ServeArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// CSV dataset of labeled feature rows
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Directory to write the fitted artifacts to
    #[arg(short, long, default_value = "models")]
    pub artifacts_dir: PathBuf,

    /// Held-out share of the dataset
    #[arg(long, default_value = "0.2")]
    pub test_size: f64,

    /// Seed for the split and the forest
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of trees in the forest
    #[arg(long, default_value = "100")]
    pub trees: usize,

    /// Maximum tree depth (default: grow until purity)
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// Arguments for single-URL prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// URL to classify
    #[arg(value_name = "URL")]
    pub url: String,

    /// Directory holding the fitted artifacts
    #[arg(short, long, default_value = "models")]
    pub artifacts_dir: PathBuf,
}

/// Arguments for feature extraction
#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    /// URL to extract features from
    #[arg(value_name = "URL")]
    pub url: String,
}

/// Arguments for artifact inspection
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Directory holding the fitted artifacts
    #[arg(short, long, default_value = "models")]
    pub artifacts_dir: PathBuf,
}

/// Arguments for the HTTP service
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Directory holding the fitted artifacts
    #[arg(short, long, default_value = "models")]
    pub artifacts_dir: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, default_value = "5000")]
    pub port: u16,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_train_command() {
        let args = PhishguardArgs::try_parse_from([
            "phishguard",
            "train",
            "data/phishing_urls.csv",
            "--artifacts-dir",
            "out/models",
            "--seed",
            "7",
            "--trees",
            "50",
        ])
        .unwrap();

        if let Command::Train(train_args) = args.command {
            assert_eq!(train_args.dataset, PathBuf::from("data/phishing_urls.csv"));
            assert_eq!(train_args.artifacts_dir, PathBuf::from("out/models"));
            assert_eq!(train_args.seed, 7);
            assert_eq!(train_args.trees, 50);
            assert_eq!(train_args.test_size, 0.2);
            assert_eq!(train_args.max_depth, None);
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_predict_command() {
        let args =
            PhishguardArgs::try_parse_from(["phishguard", "predict", "http://bit.ly/abc"]).unwrap();

        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.url, "http://bit.ly/abc");
            assert_eq!(predict_args.artifacts_dir, PathBuf::from("models"));
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_serve_command_defaults() {
        let args = PhishguardArgs::try_parse_from(["phishguard", "serve"]).unwrap();

        if let Command::Serve(serve_args) = args.command {
            assert_eq!(serve_args.host, "127.0.0.1");
            assert_eq!(serve_args.port, 5000);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = PhishguardArgs::try_parse_from(["phishguard", "extract", "x"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = PhishguardArgs::try_parse_from(["phishguard", "-vv", "extract", "x"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args =
            PhishguardArgs::try_parse_from(["phishguard", "--quiet", "extract", "x"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            PhishguardArgs::try_parse_from(["phishguard", "--format", "json", "extract", "x"])
                .unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}
