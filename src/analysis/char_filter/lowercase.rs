//! Lowercase char filter.

use super::CharFilter;

/// A char filter that lowercases the entire input string.
///
/// Runs before any pattern replacement so that scheme prefixes such as
/// `HTTP://` are caught by lowercase patterns.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
