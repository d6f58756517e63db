//! Message text normalizer.
//!
//! Maps raw message text to a cleaned string that contains only lowercase
//! Latin letters separated by single spaces. The steps, in order:
//!
//! 1. lowercase the whole string
//! 2. remove URL-like substrings (`http...`, `www...`)
//! 3. remove digit runs of length three or more
//! 4. remove every character that is not `a-z` or whitespace
//! 5. collapse whitespace runs to one space and trim
//!
//! Step 4 can join fragments into a new URL-like word (`"h.ttpx"` becomes
//! `"httpx"`), so the chain is re-applied until the output stops changing.
//! This keeps [`normalize`] idempotent.
//!
//! # Examples
//!
//! ```
//! use spamlens::analysis::normalizer::normalize;
//!
//! let cleaned = normalize("WINNER!! Call 09061701461 or visit http://win.example now");
//! assert_eq!(cleaned, "winner call or visit now");
//!
//! // No alphabetic content at all: the record is unusable.
//! assert_eq!(normalize("12 :-) 34"), "");
//! ```

use std::sync::{Arc, LazyLock};

use crate::analysis::char_filter::{CharFilter, LowercaseCharFilter, PatternReplaceCharFilter};
use crate::error::Result;

/// Pattern for URL-like substrings.
pub const URL_PATTERN: &str = r"http\S+|www\S+";

/// Pattern for phone-number-like digit runs.
pub const DIGIT_RUN_PATTERN: &str = r"\d{3,}";

/// Pattern for everything outside the cleaned alphabet.
pub const NON_ALPHA_PATTERN: &str = r"[^a-z\s]";

/// Pattern for whitespace runs.
pub const WHITESPACE_PATTERN: &str = r"\s+";

static DEFAULT_NORMALIZER: LazyLock<TextNormalizer> =
    LazyLock::new(|| TextNormalizer::sms().expect("Default normalizer patterns should be valid"));

/// Normalize raw message text with the default SMS normalizer.
///
/// Deterministic and pure. An empty result means the message carries no
/// usable content and must be excluded from the corpus.
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

/// A chain of char filters applied in order, followed by a trim.
#[derive(Clone)]
pub struct TextNormalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field(
                "char_filters",
                &self.char_filters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl TextNormalizer {
    /// Create an empty normalizer. Only trimming is applied.
    pub fn new() -> Self {
        TextNormalizer {
            char_filters: Vec::new(),
        }
    }

    /// Create the normalizer used for SMS messages.
    pub fn sms() -> Result<Self> {
        Ok(Self::new()
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::remove(URL_PATTERN)?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::remove(DIGIT_RUN_PATTERN)?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::remove(NON_ALPHA_PATTERN)?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(
                WHITESPACE_PATTERN,
                " ",
            )?)))
    }

    /// Add a char filter to the end of the chain.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Get the char filters of this normalizer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Normalize the text, re-running the chain until it reaches a fixpoint.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.apply_once(text);
        loop {
            let next = self.apply_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn apply_once(&self, text: &str) -> String {
        let mut filtered = text.to_string();
        for char_filter in &self.char_filters {
            filtered = char_filter.filter(&filtered);
        }
        filtered.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        DEFAULT_NORMALIZER.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_clean(text: &str) -> bool {
        text.chars().all(|c| c.is_ascii_lowercase() || c == ' ')
            && !text.starts_with(' ')
            && !text.ends_with(' ')
            && !text.contains("  ")
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("  Ok...   lar   "), "ok lar");
    }

    #[test]
    fn test_removes_urls() {
        assert_eq!(normalize("see http://spam.example/x?y=1 now"), "see now");
        assert_eq!(normalize("go to WWW.Prize.com today"), "go to today");
        assert_eq!(normalize("HTTPS://A.B"), "");
    }

    #[test]
    fn test_removes_long_digit_runs_and_short_digits() {
        assert_eq!(normalize("call 08712460324 now"), "call now");
        assert_eq!(normalize("txt 2 win"), "txt win");
        assert_eq!(normalize("4u"), "u");
    }

    #[test]
    fn test_non_alphabetic_input_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("123 456 !!!"), "");
        assert_eq!(normalize("日本語"), "");
    }

    #[test]
    fn test_unicode_whitespace_collapses() {
        assert_eq!(normalize("a\u{a0}\u{2003}b\tc\r\nd"), "a b c d");
    }

    #[test]
    fn test_output_alphabet_and_idempotence() {
        let inputs = [
            "Free entry in 2 a wkly comp to win FA Cup final tkts 21st May 2005.",
            "U dun say so early hor... U c already then say...",
            "h.ttpx marks the spot",
            "w.w.w.example ends here",
            "Ünïcödé ßtraße ça va?",
            "\t\n  ",
            "£1000 cash!!! call 0906-170-1461",
        ];
        for input in inputs {
            let once = normalize(input);
            assert!(is_clean(&once), "not clean: {once:?} (from {input:?})");
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_rejoined_url_fragments_reach_fixpoint() {
        assert_eq!(normalize("h.ttpx marks the spot"), "marks the spot");
    }

    #[test]
    fn test_custom_normalizer() {
        let normalizer = TextNormalizer::new()
            .add_char_filter(Arc::new(LowercaseCharFilter::new()));
        assert_eq!(normalizer.normalize("  ABC  "), "abc");
        assert_eq!(normalizer.char_filters().len(), 1);
    }
}
