//! Command implementations for the phishguard CLI.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::cli::args::*;
use crate::cli::output::output_result;
use crate::error::{PhishguardError, Result};
use crate::features::extractor::UrlFeatureExtractor;
use crate::features::vector::FeatureVector;
use crate::model::artifacts::load_artifacts;
use crate::scorer::{Label, Scorer};
use crate::server::{self, AppState};
use crate::training::pipeline::{TrainingConfig, train};

/// Execute a CLI command.
pub fn execute_command(args: PhishguardArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => run_train(train_args.clone(), &args),
        Command::Predict(predict_args) => run_predict(predict_args.clone(), &args),
        Command::Extract(extract_args) => run_extract(extract_args.clone(), &args),
        Command::Stats(stats_args) => run_stats(stats_args.clone(), &args),
        Command::Serve(serve_args) => run_serve(serve_args.clone(), &args),
    }
}

/// Result structure for single-URL prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub url: String,
    pub prediction: Label,
    pub confidence: f64,
    pub features: FeatureVector,
}

/// Result structure for feature extraction.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub url: String,
    pub features: FeatureVector,
}

/// Train the model pair from a labeled dataset.
fn run_train(args: TrainArgs, cli_args: &PhishguardArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Training from: {}", args.dataset.display());
        println!("Artifacts dir: {}", args.artifacts_dir.display());
    }

    let config = TrainingConfig {
        dataset_path: args.dataset,
        artifacts_dir: args.artifacts_dir,
        test_size: args.test_size,
        seed: args.seed,
        n_trees: args.trees,
        max_depth: args.max_depth,
    };
    let report = train(&config)?;

    output_result("Training complete", &report, cli_args)
}

/// Classify one URL against persisted artifacts.
fn run_predict(args: PredictArgs, cli_args: &PhishguardArgs) -> Result<()> {
    let scorer = Scorer::load(&args.artifacts_dir)?;
    let extractor = UrlFeatureExtractor::new();

    let features = extractor.extract(&args.url);
    let verdict = scorer.classify(&features)?;

    output_result(
        "Prediction",
        &PredictionResult {
            url: args.url,
            prediction: verdict.label,
            confidence: verdict.confidence,
            features,
        },
        cli_args,
    )
}

/// Extract the feature vector for one URL.
fn run_extract(args: ExtractArgs, cli_args: &PhishguardArgs) -> Result<()> {
    let extractor = UrlFeatureExtractor::new();
    let features = extractor.extract(&args.url);

    output_result(
        "Extracted features",
        &ExtractionResult {
            url: args.url,
            features,
        },
        cli_args,
    )
}

/// Show metadata of persisted artifacts.
fn run_stats(args: StatsArgs, cli_args: &PhishguardArgs) -> Result<()> {
    let (_, _, metadata) = load_artifacts(&args.artifacts_dir)?;
    output_result("Model metadata", &metadata, cli_args)
}

/// Run the HTTP inference service.
///
/// A failed artifact load is logged and the service starts degraded,
/// answering 503 on prediction endpoints instead of exiting.
fn run_serve(args: ServeArgs, cli_args: &PhishguardArgs) -> Result<()> {
    let scorer = match Scorer::load(&args.artifacts_dir) {
        Ok(scorer) => Some(scorer),
        Err(err) => {
            error!(%err, dir = %args.artifacts_dir.display(), "could not load model artifacts");
            None
        }
    };

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|_| {
            PhishguardError::invalid_argument(format!(
                "invalid bind address {}:{}",
                args.host, args.port
            ))
        })?;

    if cli_args.verbosity() > 0 {
        println!("Serving on http://{addr}/");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(addr, AppState::new(scorer)))
}
