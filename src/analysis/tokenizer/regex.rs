//! Regex-based tokenizer implementation.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, SpamLensError};

/// Default token pattern: runs of two or more word characters.
///
/// Single-letter words ("u", "r", "a") are dropped at this stage.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

static DEFAULT_TOKEN_REGEX: LazyLock<Arc<Regex>> = LazyLock::new(|| {
    Arc::new(Regex::new(DEFAULT_TOKEN_PATTERN).expect("Default token pattern should be valid"))
});

/// A regex-based tokenizer that emits every match of its pattern as a token.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with [`DEFAULT_TOKEN_PATTERN`].
    pub fn new() -> Self {
        RegexTokenizer {
            pattern: Arc::clone(&DEFAULT_TOKEN_REGEX),
        }
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| SpamLensError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_tokenizer() {
        let tokenizer = RegexTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("win big money").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "win");
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 3);

        assert_eq!(tokens[2].text, "money");
        assert_eq!(tokens[2].position, 2);
        assert_eq!(tokens[2].start_offset, 8);
        assert_eq!(tokens[2].end_offset, 13);
    }

    #[test]
    fn test_single_letters_are_dropped() {
        let tokenizer = RegexTokenizer::new();
        let tokens: Vec<String> = tokenizer
            .tokenize("u r a winner")
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["winner"]);
    }

    #[test]
    fn test_custom_pattern() {
        let tokenizer = RegexTokenizer::with_pattern(r"[a-z]+").unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("u r ok").unwrap().collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokenizer.pattern(), "[a-z]+");
        assert!(RegexTokenizer::with_pattern("[").is_err());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(RegexTokenizer::new().name(), "regex");
    }
}
