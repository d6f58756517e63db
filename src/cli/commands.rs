//! Command implementations for the spamlens CLI.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::TrainingConfig;
use crate::corpus::{self, load_corpus, save_cleaned_csv};
use crate::detector::SpamDetector;
use crate::error::Result;
use crate::pipeline;

/// Words that end an interactive session, compared case-insensitively.
const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// Execute a CLI command.
pub fn execute_command(args: SpamLensArgs) -> Result<()> {
    match &args.command {
        Command::Prepare(prepare_args) => prepare_corpus(prepare_args.clone(), &args),
        Command::Train(train_args) => train_model(train_args.clone(), &args),
        Command::Evaluate(evaluate_args) => evaluate_model(evaluate_args.clone(), &args),
        Command::Predict(predict_args) => predict_messages(predict_args.clone(), &args),
    }
}

/// Load, clean and optionally write out a corpus.
fn prepare_corpus(args: PrepareArgs, cli_args: &SpamLensArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Loading corpus from: {}", args.input.display());
    }

    let loaded = load_corpus(&args.input)?;
    let prepared = corpus::prepare(&loaded.messages);

    if let Some(output) = &args.output {
        create_parent_dirs(output)?;
        save_cleaned_csv(&prepared.messages, output)?;
    }

    let result = PrepareResult {
        input: args.input.display().to_string(),
        rows_read: loaded.messages.len() + loaded.rejected.len(),
        rows_rejected: loaded.rejected.len(),
        messages_dropped: prepared.dropped,
        corpus: prepared.class_counts(),
        output: args.output.as_ref().map(|p| p.display().to_string()),
    };

    output_result("Corpus prepared", &result, cli_args)
}

/// Resolve the training configuration: file first, then flag overrides.
fn training_config(args: &TrainArgs) -> Result<TrainingConfig> {
    let mut config = match &args.config {
        Some(path) => TrainingConfig::from_file(path)?,
        None => TrainingConfig::default(),
    };

    if let Some(max_features) = args.max_features {
        config = config.with_max_features(max_features);
    }
    if let Some(alpha) = args.alpha {
        config = config.with_alpha(alpha);
    }
    if let Some(test_size) = args.test_size {
        config = config.with_test_size(test_size);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    config.validate()?;
    Ok(config)
}

/// Train a model and save it.
fn train_model(args: TrainArgs, cli_args: &SpamLensArgs) -> Result<()> {
    let config = training_config(&args)?;
    debug!("Training configuration: {config:?}");

    if cli_args.verbosity() > 1 {
        println!("Loading corpus from: {}", args.input.display());
    }
    let loaded = load_corpus(&args.input)?;

    let start = Instant::now();
    let (model, report) = pipeline::train(&loaded.messages, &config)?;
    info!("Training took {:?}", start.elapsed());

    model.save(&args.model)?;

    let result = TrainResult {
        model_path: args.model.display().to_string(),
        report,
    };

    output_result("Model trained", &result, cli_args)
}

/// Score a saved model on a labeled corpus.
fn evaluate_model(args: EvaluateArgs, cli_args: &SpamLensArgs) -> Result<()> {
    let detector = SpamDetector::open(&args.model)?;
    let loaded = load_corpus(&args.input)?;
    let report = pipeline::evaluate_messages(&detector, &loaded.messages)?;

    let result = EvaluateResult {
        model_path: args.model.display().to_string(),
        report,
    };

    output_result("Model evaluated", &result, cli_args)
}

/// Classify the given messages, or run an interactive session.
fn predict_messages(args: PredictArgs, cli_args: &SpamLensArgs) -> Result<()> {
    let detector = SpamDetector::open(&args.model)?;

    if args.messages.is_empty() {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return run_interactive(&detector, stdin.lock(), stdout.lock(), cli_args);
    }

    let results: Vec<PredictionResult> = detector
        .predict_batch(&args.messages)
        .into_iter()
        .zip(args.messages)
        .map(|(detection, message)| PredictionResult { message, detection })
        .collect();

    output_result("Predictions", &results, cli_args)
}

fn is_quit_word(line: &str) -> bool {
    QUIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}

/// Read messages line by line and classify each one until a quit word or
/// end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    detector: &SpamDetector,
    mut input: R,
    mut output: W,
    cli_args: &SpamLensArgs,
) -> Result<()> {
    let human = cli_args.output_format == OutputFormat::Human;
    if human {
        writeln!(output, "Spam detector ready. Type 'quit' to exit.")?;
    }

    let mut line = String::new();
    loop {
        if human {
            write!(output, "\nEnter a message: ")?;
            output.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if is_quit_word(message) {
            if human {
                writeln!(output, "Goodbye!")?;
            }
            break;
        }

        let result = PredictionResult {
            message: message.to_string(),
            detection: detector.predict_message(message),
        };
        write_result(&mut output, "", &result, cli_args)?;
    }

    Ok(())
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
