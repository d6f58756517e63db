//! Command line argument parsing for the spamlens CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Default location of the trained model.
pub const DEFAULT_MODEL_PATH: &str = "models/spam_detector.bin";

/// spamlens - SMS spam detection with TF-IDF and Naive Bayes
#[derive(Parser, Debug, Clone)]
#[command(name = "spamlens")]
#[command(about = "Train and run an SMS spam detector")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpamLensArgs {
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

impl SpamLensArgs {
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
    /// Clean a labeled corpus and report class counts
    Prepare(PrepareArgs),

    /// Train a model on a labeled corpus
    Train(TrainArgs),

    /// Score a saved model on a labeled corpus
    Evaluate(EvaluateArgs),

    /// Classify messages, or start an interactive session
    Predict(PredictArgs),
}

/// Arguments for corpus preparation
#[derive(Parser, Debug, Clone)]
pub struct PrepareArgs {
    /// Labeled CSV corpus with `label` and `message` columns
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the cleaned corpus to this CSV file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labeled CSV corpus with `label` and `message` columns
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to save the trained model
    #[arg(short, long, value_name = "MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Training configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum vocabulary size
    #[arg(long)]
    pub max_features: Option<usize>,

    /// Smoothing parameter
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Fraction of each class held out for testing
    #[arg(long)]
    pub test_size: Option<f64>,

    /// Shuffle seed
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Labeled CSV corpus with `label` and `message` columns
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Trained model file
    #[arg(short, long, value_name = "MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Trained model file
    #[arg(short, long, value_name = "MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Messages to classify; reads from stdin interactively when omitted
    #[arg(value_name = "MESSAGE")]
    pub messages: Vec<String>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
