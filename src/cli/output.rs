//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpamLensArgs};
use crate::corpus::{ClassCounts, Label};
use crate::detector::Detection;
use crate::error::Result;
use crate::ml::Evaluation;
use crate::pipeline::{EvaluationReport, TrainingReport};

/// Result structure for corpus preparation.
#[derive(Debug, Serialize, Deserialize)]
pub struct PrepareResult {
    pub input: String,
    pub rows_read: usize,
    pub rows_rejected: usize,
    pub messages_dropped: usize,
    pub corpus: ClassCounts,
    pub output: Option<String>,
}

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub model_path: String,
    pub report: TrainingReport,
}

/// Result structure for evaluation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateResult {
    pub model_path: String,
    pub report: EvaluationReport,
}

/// Result structure for a single prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub message: String,
    #[serde(flatten)]
    pub detection: Detection,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Output a result to stdout in the format selected on the command line.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &SpamLensArgs,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result in the format selected on the command line.
pub fn write_result<W: Write, T: Serialize + HumanOutput>(
    out: &mut W,
    message: &str,
    result: &T,
    args: &SpamLensArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 && !message.is_empty() {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_counts(out: &mut dyn Write, counts: &ClassCounts) -> io::Result<()> {
    writeln!(out, "Valid messages: {}", counts.total())?;
    writeln!(out, "  - Spam: {}", counts.spam)?;
    writeln!(out, "  - Ham: {}", counts.ham)
}

fn write_evaluation(out: &mut dyn Write, evaluation: &Evaluation) -> io::Result<()> {
    let cm = &evaluation.confusion_matrix;
    writeln!(out, "Accuracy: {:.2}%", evaluation.accuracy * 100.0)?;
    writeln!(out)?;
    writeln!(out, "Classification report:")?;
    write!(out, "{}", evaluation.report())?;
    writeln!(out)?;
    writeln!(out, "Confusion matrix:")?;
    writeln!(out, "  True negatives (ham correct): {}", cm.get(Label::Ham, Label::Ham))?;
    writeln!(out, "  False positives (ham predicted spam): {}", cm.get(Label::Ham, Label::Spam))?;
    writeln!(out, "  False negatives (spam predicted ham): {}", cm.get(Label::Spam, Label::Ham))?;
    writeln!(out, "  True positives (spam correct): {}", cm.get(Label::Spam, Label::Spam))
}

impl HumanOutput for PrepareResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Input: {}", self.input)?;
        writeln!(out, "Rows read: {}", self.rows_read)?;
        writeln!(out, "Rows rejected: {}", self.rows_rejected)?;
        writeln!(out, "Messages empty after cleaning: {}", self.messages_dropped)?;
        write_counts(out, &self.corpus)?;
        if let Some(output) = &self.output {
            writeln!(out, "Cleaned corpus written to: {output}")?;
        }
        Ok(())
    }
}

impl HumanOutput for TrainResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        let report = &self.report;
        write_counts(out, &report.corpus)?;
        writeln!(out, "Dropped (empty after cleaning): {}", report.dropped)?;
        writeln!(out, "Training messages: {}", report.train_size)?;
        writeln!(out, "Test messages: {}", report.test_size)?;
        writeln!(out, "Features: {}", report.n_features)?;
        writeln!(out)?;
        write_evaluation(out, &report.evaluation)?;
        writeln!(out)?;
        writeln!(out, "Model saved to: {}", self.model_path)
    }
}

impl HumanOutput for EvaluateResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Model: {}", self.model_path)?;
        write_counts(out, &self.report.corpus)?;
        writeln!(out, "Dropped (empty after cleaning): {}", self.report.dropped)?;
        writeln!(out)?;
        write_evaluation(out, &self.report.evaluation)
    }
}

impl HumanOutput for PredictionResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        let label = match self.detection.label {
            Label::Spam => "SPAM",
            Label::Ham => "HAM (normal)",
        };
        writeln!(out, "Message: {}", self.message)?;
        writeln!(out, "→ Result: {label}")?;
        writeln!(out, "→ Confidence: {:.2}%", self.detection.confidence_percent)
    }
}

impl<T: HumanOutput> HumanOutput for Vec<T> {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                writeln!(out, "{}", "-".repeat(60))?;
            }
            item.write_human(out)?;
        }
        Ok(())
    }
}
