//! Classifier trait and prediction types.

use serde::{Deserialize, Serialize};

use crate::corpus::Label;
use crate::ml::sparse::SparseVector;

/// Probability of each class. The two values sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    /// Probability that the message is legitimate.
    pub ham: f64,

    /// Probability that the message is spam.
    pub spam: f64,
}

impl ClassProbabilities {
    /// Get the probability of a class.
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Ham => self.ham,
            Label::Spam => self.spam,
        }
    }
}

/// A predicted label with its class probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The predicted class.
    pub label: Label,

    /// Probability of each class.
    pub probabilities: ClassProbabilities,
}

impl Prediction {
    /// Probability of the predicted class.
    pub fn confidence(&self) -> f64 {
        self.probabilities.get(self.label)
    }

    /// Probability of the predicted class as a percentage.
    pub fn confidence_percent(&self) -> f64 {
        self.confidence() * 100.0
    }
}

/// Classifier trait.
///
/// Implementations score a feature vector produced by a fitted vectorizer.
/// Prediction is total: every vector, including the all-zero vector, gets
/// a label.
pub trait Classifier: Send + Sync {
    /// Predict the class of a feature vector.
    fn predict(&self, vector: &SparseVector) -> Prediction;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
