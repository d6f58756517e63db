//! Labeled message corpus: loading, cleaning and splitting.
//!
//! # Examples
//!
//! ```
//! use spamlens::corpus::{self, Label};
//!
//! let data = "label,message\nham,See you at 5!\nspam,FREE entry: txt WIN to 80086\nham,123\n";
//! let loaded = corpus::read_corpus(data.as_bytes()).unwrap();
//! let prepared = corpus::prepare(&loaded.messages);
//!
//! assert_eq!(prepared.dropped, 1);
//! assert_eq!(prepared.messages[1].text, "free entry txt win to");
//! assert_eq!(prepared.class_counts().get(Label::Ham), 1);
//! ```

mod label;
mod reader;
mod split;

pub use label::Label;
pub use reader::{
    LABEL_COLUMN, LoadedCorpus, MESSAGE_COLUMN, RejectedRecord, load_corpus, read_corpus,
    save_cleaned_csv, write_cleaned_csv,
};
pub use split::{Split, train_test_split};

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;

/// A raw labeled message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message text exactly as read from the corpus.
    pub text: String,

    /// Class the message is labeled with.
    pub label: Label,
}

impl Message {
    /// Create a new message.
    pub fn new<S: Into<String>>(text: S, label: Label) -> Self {
        Message {
            text: text.into(),
            label,
        }
    }
}

/// A labeled message after normalization. The text is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedMessage {
    /// Normalized text: lowercase `a-z` words separated by single spaces.
    pub text: String,

    /// Class carried over from the raw message.
    pub label: Label,
}

impl CleanedMessage {
    /// Create a cleaned message from already-normalized text.
    pub fn new<S: Into<String>>(text: S, label: Label) -> Self {
        CleanedMessage {
            text: text.into(),
            label,
        }
    }
}

/// Number of messages per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassCounts {
    /// Number of ham messages.
    pub ham: usize,

    /// Number of spam messages.
    pub spam: usize,
}

impl ClassCounts {
    /// Count the labels of a sequence.
    pub fn from_labels<I: IntoIterator<Item = Label>>(labels: I) -> Self {
        let mut counts = ClassCounts::default();
        for label in labels {
            match label {
                Label::Ham => counts.ham += 1,
                Label::Spam => counts.spam += 1,
            }
        }
        counts
    }

    /// Count for one class.
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Ham => self.ham,
            Label::Spam => self.spam,
        }
    }

    /// Number of messages across both classes.
    pub fn total(&self) -> usize {
        self.ham + self.spam
    }
}

/// Result of cleaning a corpus.
#[derive(Debug, Clone, Default)]
pub struct PreparedCorpus {
    /// Messages whose normalized text is non-empty, in input order.
    pub messages: Vec<CleanedMessage>,

    /// Number of messages that normalized to an empty string.
    pub dropped: usize,
}

impl PreparedCorpus {
    /// Class counts of the kept messages.
    pub fn class_counts(&self) -> ClassCounts {
        ClassCounts::from_labels(self.messages.iter().map(|m| m.label))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Normalize every message and drop those left empty.
pub fn prepare(messages: &[Message]) -> PreparedCorpus {
    let mut prepared = PreparedCorpus::default();
    for message in messages {
        let text = normalize(&message.text);
        if text.is_empty() {
            prepared.dropped += 1;
        } else {
            prepared.messages.push(CleanedMessage::new(text, message.label));
        }
    }

    let counts = prepared.class_counts();
    info!(
        "Prepared {} messages ({} spam, {} ham, {} dropped)",
        prepared.messages.len(),
        counts.spam,
        counts.ham,
        prepared.dropped
    );
    prepared
}
