//! Core analyzer trait definition.
//!
//! An analyzer turns cleaned message text into the terms the vectorizer
//! counts:
//!
//! ```text
//! Cleaned Text → Analyzer → Token Stream → Term Counts
//!                   ↓
//!               Tokenizer
//!                   ↓
//!              Stop Filter
//!                   ↓
//!            Shingle Filter
//! ```
//!
//! # Examples
//!
//! ```
//! use spamlens::analysis::analyzer::{Analyzer, NgramAnalyzer};
//!
//! let analyzer = NgramAnalyzer::default();
//! let terms: Vec<_> = analyzer.analyze("win free money").unwrap().map(|t| t.text).collect();
//!
//! assert_eq!(terms, vec!["win", "free", "money", "win free", "free money"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analyzers are shared between rayon workers during batch vectorization,
/// hence the `Send + Sync` bound.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &'static str;
}
