//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the analysis pipeline. After
//! the shingle filter runs, a token may stand for several source words
//! joined by a single space (a bigram such as `"free money"`), in which case
//! `position_length` records how many words it spans.
//!
//! # Examples
//!
//! ```
//! use spamlens::analysis::token::Token;
//!
//! let token = Token::with_offsets("money", 1, 5, 10);
//! assert_eq!(token.text, "money");
//! assert_eq!(token.position, 1);
//! assert_eq!(token.position_length, 1);
//! ```

use serde::{Deserialize, Serialize};

/// A single analyzed token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the first word of the token in the stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the analyzed text
    pub start_offset: usize,

    /// The byte offset where this token ends in the analyzed text
    pub end_offset: usize,

    /// Number of words this token spans (1 for unigrams, 2 for bigrams)
    pub position_length: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            position_length: 1,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            position_length: 1,
        }
    }

    /// Set the number of words this token spans.
    pub fn with_position_length(mut self, position_length: usize) -> Self {
        self.position_length = position_length;
        self
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check whether the token is an n-gram of two or more words.
    pub fn is_shingle(&self) -> bool {
        self.position_length > 1
    }
}

/// A boxed iterator over tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;
