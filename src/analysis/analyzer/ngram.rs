//! Word n-gram analyzer used to build bag-of-words features.
//!
//! # Pipeline
//!
//! 1. RegexTokenizer (runs of two or more word characters)
//! 2. StopFilter (English stop words, optional)
//! 3. ShingleFilter (every n-gram size in the configured range)
//!
//! # Examples
//!
//! ```
//! use spamlens::analysis::analyzer::{Analyzer, NgramAnalyzer};
//!
//! let analyzer = NgramAnalyzer::default();
//! let tokens: Vec<_> = analyzer.analyze("call you later").unwrap().collect();
//!
//! // "call" and "you" are stop words
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "later");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{ShingleFilter, StopFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::Result;

/// An analyzer producing stop-word-filtered word n-grams.
pub struct NgramAnalyzer {
    inner: PipelineAnalyzer,
    min_n: usize,
    max_n: usize,
}

impl NgramAnalyzer {
    /// Create a new n-gram analyzer for sizes `min_n..=max_n`.
    ///
    /// Returns a configuration error when the range is empty or starts at 0.
    pub fn new(min_n: usize, max_n: usize, stop_filter: Option<StopFilter>) -> Result<Self> {
        let shingle = ShingleFilter::new(min_n, max_n)?;

        let mut analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()));
        if let Some(stop_filter) = stop_filter {
            analyzer = analyzer.add_filter(Arc::new(stop_filter));
        }
        let analyzer = analyzer
            .add_filter(Arc::new(shingle))
            .with_name(format!("ngram_{min_n}_{max_n}"));

        Ok(NgramAnalyzer {
            inner: analyzer,
            min_n,
            max_n,
        })
    }

    /// Get the n-gram size range.
    pub fn ngram_range(&self) -> (usize, usize) {
        (self.min_n, self.max_n)
    }
}

impl Default for NgramAnalyzer {
    /// Unigrams and bigrams with English stop words removed.
    fn default() -> Self {
        Self::new(1, 2, Some(StopFilter::new()))
            .expect("Default n-gram analyzer should be creatable")
    }
}

impl Analyzer for NgramAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

impl std::fmt::Debug for NgramAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NgramAnalyzer")
            .field("ngram_range", &(self.min_n, self.max_n))
            .field("inner", &self.inner)
            .finish()
    }
}
