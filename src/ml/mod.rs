//! Feature extraction, classification and evaluation.
//!
//! The free functions below are the state-level entry points; the
//! [`TfIdfVectorizer`] and [`MultinomialNaiveBayes`] handles wrap the same
//! states with a prebuilt analyzer and are what the detector uses.
//!
//! # Examples
//!
//! ```
//! use spamlens::config::NgramRange;
//! use spamlens::corpus::Label;
//! use spamlens::ml;
//!
//! let corpus = ["win money now", "call you later", "free money win", "are you free later"];
//! let labels = [Label::Spam, Label::Ham, Label::Spam, Label::Ham];
//!
//! let vectorizer = ml::fit_vectorizer(&corpus, 3000, NgramRange::new(1, 2)).unwrap();
//! let vectors: Vec<_> = corpus.iter().map(|t| ml::transform(t, &vectorizer)).collect();
//! let model = ml::fit_classifier(&vectors, &labels, 1.0).unwrap();
//!
//! let prediction = ml::predict(&ml::transform("win free money", &vectorizer), &model);
//! assert_eq!(prediction.label, Label::Spam);
//! assert!(prediction.probabilities.spam > 0.5);
//! ```

pub mod classifier;
pub mod evaluation;
pub mod model;
pub mod naive_bayes;
pub mod sparse;
pub mod tfidf;

pub use classifier::{ClassProbabilities, Classifier, Prediction};
pub use evaluation::{
    ClassMetrics, ClassificationReport, ConfusionMatrix, Evaluation, evaluate,
};
pub use model::{FORMAT_VERSION, SpamModel};
pub use naive_bayes::{MultinomialNaiveBayes, NaiveBayesState};
pub use sparse::SparseVector;
pub use tfidf::{TfIdfVectorizer, VectorizerState};

use crate::config::{NaiveBayesConfig, NgramRange, VectorizerConfig};
use crate::corpus::Label;
use crate::error::Result;

/// Fit a vectorizer with default stop words and `min_df`.
pub fn fit_vectorizer<S: AsRef<str>>(
    corpus: &[S],
    max_terms: usize,
    ngram_range: NgramRange,
) -> Result<VectorizerState> {
    let config = VectorizerConfig::new(max_terms, ngram_range);
    Ok(TfIdfVectorizer::fit(corpus, &config)?.into_state())
}

/// Transform cleaned text with a fitted state. Never fails.
pub fn transform(text: &str, state: &VectorizerState) -> SparseVector {
    tfidf::transform_with_state(state, text)
}

/// Fit a multinomial Naive Bayes classifier.
pub fn fit_classifier(
    vectors: &[SparseVector],
    labels: &[Label],
    alpha: f64,
) -> Result<NaiveBayesState> {
    let config = NaiveBayesConfig { alpha };
    Ok(MultinomialNaiveBayes::fit(vectors, labels, &config)?.into_state())
}

/// Predict with a fitted state. Never fails.
pub fn predict(vector: &SparseVector, state: &NaiveBayesState) -> Prediction {
    naive_bayes::predict_with_state(state, vector)
}
