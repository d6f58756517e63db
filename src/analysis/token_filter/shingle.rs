//! Shingle (word n-gram) filter.
//!
//! Builds word n-grams over the incoming stream. For every size `n` in
//! `min_size..=max_size`, each run of `n` consecutive tokens is joined with a
//! single space. All grams of the smallest size come first, then the next
//! size, and so on.
//!
//! # Examples
//!
//! ```
//! use spamlens::analysis::token_filter::Filter;
//! use spamlens::analysis::token_filter::shingle::ShingleFilter;
//! use spamlens::analysis::token::Token;
//!
//! let filter = ShingleFilter::new(1, 2).unwrap();
//! let tokens = vec![Token::new("free", 0), Token::new("money", 1), Token::new("win", 2)];
//!
//! let texts: Vec<String> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(texts, vec!["free", "money", "win", "free money", "money win"]);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{Result, SpamLensError};

/// A filter that emits word n-grams of every size in a range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShingleFilter {
    min_size: usize,
    max_size: usize,
}

impl ShingleFilter {
    /// Create a new shingle filter. Requires `1 <= min_size <= max_size`.
    pub fn new(min_size: usize, max_size: usize) -> Result<Self> {
        if min_size == 0 || min_size > max_size {
            return Err(SpamLensError::configuration(format!(
                "Invalid n-gram range ({min_size}, {max_size})"
            )));
        }

        Ok(ShingleFilter { min_size, max_size })
    }

    /// Get the smallest n-gram size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Get the largest n-gram size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let tokens: Vec<Token> = tokens.collect();
        let mut shingles = Vec::new();

        for n in self.min_size..=self.max_size {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                if n == 1 {
                    shingles.push(window[0].clone());
                    continue;
                }
                let text = window
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let first = &window[0];
                let last = &window[n - 1];
                shingles.push(
                    Token::with_offsets(text, first.position, first.start_offset, last.end_offset)
                        .with_position_length(n),
                );
            }
        }

        Ok(Box::new(shingles.into_iter()))
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}
