//! Accuracy, confusion matrix and per-class classification report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::corpus::Label;
use crate::error::{Result, SpamLensError};

/// 2x2 confusion matrix. Rows are the true class, columns the predicted
/// class, both indexed by [`Label::as_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    /// Number of samples of class `truth` predicted as `predicted`.
    pub fn get(&self, truth: Label, predicted: Label) -> usize {
        self.counts[truth.as_index()][predicted.as_index()]
    }

    /// Number of samples whose true class is `label`.
    pub fn support(&self, label: Label) -> usize {
        self.counts[label.as_index()].iter().sum()
    }

    /// Number of samples predicted as `label`.
    pub fn predicted(&self, label: Label) -> usize {
        self.counts.iter().map(|row| row[label.as_index()]).sum()
    }

    /// Total number of samples.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Number of correct predictions.
    pub fn correct(&self) -> usize {
        self.counts[0][0] + self.counts[1][1]
    }
}

/// Precision, recall, F1 and support of one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub ham: ClassMetrics,
    pub spam: ClassMetrics,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

/// Result of comparing predictions with the truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub confusion_matrix: ConfusionMatrix,
}

/// Compare predicted labels with true labels.
///
/// Both slices must be non-empty and of equal length.
pub fn evaluate(predictions: &[Label], truth: &[Label]) -> Result<Evaluation> {
    if predictions.len() != truth.len() {
        return Err(SpamLensError::configuration(format!(
            "Got {} predictions but {} true labels",
            predictions.len(),
            truth.len()
        )));
    }
    if predictions.is_empty() {
        return Err(SpamLensError::configuration(
            "Cannot evaluate an empty set of predictions",
        ));
    }

    let mut confusion_matrix = ConfusionMatrix::default();
    for (predicted, actual) in predictions.iter().zip(truth) {
        confusion_matrix.counts[actual.as_index()][predicted.as_index()] += 1;
    }

    Ok(Evaluation {
        accuracy: confusion_matrix.correct() as f64 / confusion_matrix.total() as f64,
        confusion_matrix,
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl Evaluation {
    /// Metrics of a single class. Zero denominators give 0.0.
    pub fn class_metrics(&self, label: Label) -> ClassMetrics {
        let cm = &self.confusion_matrix;
        let true_positive = cm.get(label, label);
        let precision = ratio(true_positive, cm.predicted(label));
        let recall = ratio(true_positive, cm.support(label));
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        ClassMetrics {
            precision,
            recall,
            f1,
            support: cm.support(label),
        }
    }

    /// Full classification report.
    pub fn report(&self) -> ClassificationReport {
        let ham = self.class_metrics(Label::Ham);
        let spam = self.class_metrics(Label::Spam);
        let total = ham.support + spam.support;

        let macro_avg = ClassMetrics {
            precision: (ham.precision + spam.precision) / 2.0,
            recall: (ham.recall + spam.recall) / 2.0,
            f1: (ham.f1 + spam.f1) / 2.0,
            support: total,
        };
        let weight = |h: f64, s: f64| {
            if total == 0 {
                0.0
            } else {
                (h * ham.support as f64 + s * spam.support as f64) / total as f64
            }
        };
        let weighted_avg = ClassMetrics {
            precision: weight(ham.precision, spam.precision),
            recall: weight(ham.recall, spam.recall),
            f1: weight(ham.f1, spam.f1),
            support: total,
        };

        ClassificationReport {
            ham,
            spam,
            accuracy: self.accuracy,
            macro_avg,
            weighted_avg,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>14} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for (name, m) in [("ham", &self.ham), ("spam", &self.spam)] {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>14} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}
