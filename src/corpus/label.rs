//! Message labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpamLensError;

/// The class of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// A legitimate message.
    Ham = 0,

    /// An unsolicited message.
    Spam = 1,
}

impl Label {
    /// Both labels, in index order.
    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];

    /// The literal marker used in corpus files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }

    /// Numeric class index (ham 0, spam 1).
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    /// Label for a numeric class index.
    pub fn from_index(index: usize) -> Option<Label> {
        match index {
            0 => Some(Label::Ham),
            1 => Some(Label::Spam),
            _ => None,
        }
    }
}

impl FromStr for Label {
    type Err = SpamLensError;

    /// Parse `"ham"` or `"spam"`. Surrounding whitespace is ignored; case
    /// is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ham" => Ok(Label::Ham),
            "spam" => Ok(Label::Spam),
            other => Err(SpamLensError::data(format!("Unknown label '{other}'"))),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("ham".parse::<Label>().unwrap(), Label::Ham);
        assert_eq!(" spam\t".parse::<Label>().unwrap(), Label::Spam);
        assert!("Spam".parse::<Label>().unwrap_err().is_data());
        assert!("eggs".parse::<Label>().is_err());
        assert!("".parse::<Label>().is_err());
    }

    #[test]
    fn test_index() {
        assert_eq!(Label::Ham.as_index(), 0);
        assert_eq!(Label::Spam.as_index(), 1);
        assert_eq!(Label::from_index(1), Some(Label::Spam));
        assert_eq!(Label::from_index(2), None);
        assert_eq!(Label::Spam.to_string(), "spam");
    }
}
