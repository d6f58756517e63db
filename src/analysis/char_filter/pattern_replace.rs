use regex::Regex;

use super::CharFilter;
use crate::error::{Result, SpamLensError};

/// A char filter that replaces every match of a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| SpamLensError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
        })
    }

    /// Create a filter that deletes every match of the pattern.
    pub fn remove(pattern: &str) -> Result<Self> {
        Self::new(pattern, "")
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        // `NoExpand` keeps `$` in replacements literal.
        self.pattern
            .replace_all(input, regex::NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"\s+", " ").unwrap();
        assert_eq!(filter.filter("call  me\t\nlater"), "call me later");
    }

    #[test]
    fn test_remove_pattern() {
        let filter = PatternReplaceCharFilter::remove(r"\d{3,}").unwrap();
        assert_eq!(filter.filter("call 0800123 or 12"), "call  or 12");
        assert_eq!(filter.pattern(), r"\d{3,}");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternReplaceCharFilter::new(r"(", "").is_err());
    }
}
