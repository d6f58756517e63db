//! # spamlens
//!
//! SMS spam detection with TF-IDF features and multinomial Naive Bayes.
//!
//! ## Features
//!
//! - Text normalization through a char filter pipeline
//! - Word n-gram TF-IDF vectorizer with a bounded vocabulary
//! - Multinomial Naive Bayes with additive smoothing
//! - Stratified, seeded train/test split
//! - Versioned binary model files
//!
//! ## Example
//!
//! ```
//! use spamlens::prelude::*;
//!
//! let messages = vec![
//!     Message::new("win money now", Label::Spam),
//!     Message::new("free money", Label::Spam),
//!     Message::new("win a free prize", Label::Spam),
//!     Message::new("are you free later", Label::Ham),
//!     Message::new("see you at lunch", Label::Ham),
//!     Message::new("call me later tonight", Label::Ham),
//! ];
//!
//! let config = TrainingConfig::default().with_test_size(0.34);
//! let (model, report) = train(&messages, &config).unwrap();
//! assert!(report.n_features > 0);
//!
//! let detector = SpamDetector::new(model).unwrap();
//! let detection = detector.predict_message("WIN free money!!!");
//! assert_eq!(detection.label, Label::Spam);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod detector;
pub mod error;
pub mod ml;
pub mod pipeline;

pub mod prelude {
    pub use crate::analysis::normalizer::normalize;
    pub use crate::config::{NaiveBayesConfig, SplitConfig, TrainingConfig, VectorizerConfig};
    pub use crate::corpus::{CleanedMessage, Label, Message, load_corpus, prepare};
    pub use crate::detector::{Detection, SpamDetector};
    pub use crate::error::{Result, SpamLensError};
    pub use crate::ml::{
        Classifier, Evaluation, MultinomialNaiveBayes, Prediction, SparseVector, SpamModel,
        TfIdfVectorizer,
    };
    pub use crate::pipeline::{evaluate_messages, train};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
