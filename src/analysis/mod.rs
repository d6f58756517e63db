//! Text analysis module for spamlens.
//!
//! Two stages live here. The [`normalizer`] turns raw message text into a
//! cleaned string, and the [`analyzer`] splits cleaned text into the word
//! n-grams that become vectorizer terms.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use normalizer::{TextNormalizer, normalize};
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
