//! Configuration for vectorizer fitting, classifier fitting and corpus
//! splitting.
//!
//! All structs deserialize from JSON with missing fields taking their
//! defaults, so a config file only needs to name what it overrides:
//!
//! ```json
//! { "vectorizer": { "max_features": 5000 }, "classifier": { "alpha": 0.5 } }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::StopFilter;
use crate::error::{Result, SpamLensError};

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 3000;

/// Default smoothing parameter.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Default fraction of each class held out for testing.
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Default shuffle seed.
pub const DEFAULT_SEED: u64 = 42;

/// Inclusive range of word n-gram sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramRange {
    /// Smallest n-gram size.
    pub min: usize,

    /// Largest n-gram size.
    pub max: usize,
}

impl NgramRange {
    /// Create a new n-gram range.
    pub fn new(min: usize, max: usize) -> Self {
        NgramRange { min, max }
    }

    /// Check that `1 <= min <= max`.
    pub fn validate(&self) -> Result<()> {
        if self.min == 0 || self.min > self.max {
            return Err(SpamLensError::configuration(format!(
                "Invalid n-gram range ({}, {})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl Default for NgramRange {
    fn default() -> Self {
        NgramRange { min: 1, max: 2 }
    }
}

/// Stop-word handling for the vectorizer analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    /// Keep every token.
    None,

    /// Drop the standard English stop words.
    #[default]
    English,
}

impl StopWords {
    /// Build the stop filter for this setting, if any.
    pub fn filter(&self) -> Option<StopFilter> {
        match self {
            StopWords::None => None,
            StopWords::English => Some(StopFilter::new()),
        }
    }
}

/// Configuration for the TF-IDF vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Maximum number of terms kept in the vocabulary.
    pub max_features: usize,

    /// Word n-gram sizes to extract.
    pub ngram_range: NgramRange,

    /// Minimum number of documents a term must appear in.
    pub min_df: usize,

    /// Stop-word handling.
    pub stop_words: StopWords,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: NgramRange::default(),
            min_df: 1,
            stop_words: StopWords::English,
        }
    }
}

impl VectorizerConfig {
    /// Create a config with the given vocabulary cap and n-gram range.
    pub fn new(max_features: usize, ngram_range: NgramRange) -> Self {
        Self {
            max_features,
            ngram_range,
            ..Default::default()
        }
    }

    /// Set the vocabulary cap.
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Set the minimum document frequency.
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// Set the stop-word handling.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.ngram_range.validate()?;
        if self.max_features == 0 {
            return Err(SpamLensError::configuration(
                "max_features must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Configuration for the multinomial Naive Bayes classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Additive (Laplace/Lidstone) smoothing parameter.
    pub alpha: f64,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl NaiveBayesConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(SpamLensError::configuration(format!(
                "alpha must be a positive finite number, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Configuration for the stratified train/test split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of each class put in the test partition, strictly in (0, 1).
    pub test_size: f64,

    /// Shuffle seed.
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

impl SplitConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(SpamLensError::configuration(format!(
                "test_size must lie strictly between 0 and 1, got {}",
                self.test_size
            )));
        }
        Ok(())
    }
}

/// Complete configuration of a training run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Vectorizer settings.
    pub vectorizer: VectorizerConfig,

    /// Classifier settings.
    pub classifier: NaiveBayesConfig,

    /// Split settings.
    pub split: SplitConfig,
}

impl TrainingConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: TrainingConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the vocabulary cap.
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.vectorizer.max_features = max_features;
        self
    }

    /// Set the smoothing parameter.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.classifier.alpha = alpha;
        self
    }

    /// Set the test fraction.
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.split.test_size = test_size;
        self
    }

    /// Set the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.split.seed = seed;
        self
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.classifier.validate()?;
        self.split.validate()
    }
}
