//! Spam detector handle over a loaded model.
//!
//! The detector owns a rebuilt vectorizer and classifier. Load it once and
//! pass it by reference to whatever needs predictions.
//!
//! # Examples
//!
//! ```no_run
//! use spamlens::detector::SpamDetector;
//!
//! let detector = SpamDetector::open("models/spam_detector.bin").unwrap();
//! let detection = detector.predict_message("WINNER! Claim your free prize now");
//! println!("{} ({:.2}%)", detection.label, detection.confidence_percent);
//! ```

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::corpus::Label;
use crate::error::Result;
use crate::ml::{
    ClassProbabilities, Classifier, MultinomialNaiveBayes, Prediction, SparseVector, SpamModel,
    TfIdfVectorizer,
};

/// Outcome of classifying one raw message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Predicted class.
    pub label: Label,

    /// Probability of the predicted class, times 100.
    pub confidence_percent: f64,

    /// Probability of each class.
    pub probabilities: ClassProbabilities,

    /// The normalized text that was vectorized.
    pub cleaned: String,
}

/// A loaded spam model ready for prediction.
#[derive(Debug)]
pub struct SpamDetector {
    vectorizer: TfIdfVectorizer,
    classifier: MultinomialNaiveBayes,
}

impl SpamDetector {
    /// Create a detector from a model.
    pub fn new(model: SpamModel) -> Result<Self> {
        model.validate()?;
        Ok(SpamDetector {
            vectorizer: TfIdfVectorizer::from_state(model.vectorizer)?,
            classifier: MultinomialNaiveBayes::from_state(model.classifier)?,
        })
    }

    /// Load a detector from a model file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(SpamModel::load(path)?)
    }

    /// Classify a raw message.
    ///
    /// A message that normalizes to nothing is scored on the class priors.
    pub fn predict_message(&self, text: &str) -> Detection {
        let cleaned = normalize(text);
        let prediction = self.predict_cleaned(&cleaned);
        Detection {
            label: prediction.label,
            confidence_percent: prediction.confidence_percent(),
            probabilities: prediction.probabilities,
            cleaned,
        }
    }

    /// Classify many raw messages in parallel, preserving order.
    pub fn predict_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Detection> {
        texts
            .par_iter()
            .map(|text| self.predict_message(text.as_ref()))
            .collect()
    }

    /// Classify already normalized text.
    pub fn predict_cleaned(&self, cleaned: &str) -> Prediction {
        self.classifier.predict(&self.vectorize(cleaned))
    }

    /// Vectorize already normalized text.
    pub fn vectorize(&self, cleaned: &str) -> SparseVector {
        self.vectorizer.transform(cleaned)
    }

    /// Get the vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// Get the classifier.
    pub fn classifier(&self) -> &MultinomialNaiveBayes {
        &self.classifier
    }
}
