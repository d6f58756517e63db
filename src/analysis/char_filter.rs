//! Char filters that rewrite raw text before it is tokenized.
//!
//! The message normalizer is assembled from these filters: a lowercase pass
//! followed by a sequence of regex replacements that strip URLs, long digit
//! runs and anything outside the `a-z` alphabet.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Lowercases the whole string
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text, returning the rewritten text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;

pub use lowercase::LowercaseCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
