//! CSV corpus reading and writing.
//!
//! The corpus is a CSV file with a header row. The `label` and `message`
//! columns are located by name; other columns are ignored. Fields are
//! decoded as latin-1, so any byte sequence is readable.
//!
//! ```csv
//! label,message
//! ham,"Ok lar... Joking wif u oni..."
//! spam,"WINNER!! Call 09061701461 to claim"
//! ```

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{CleanedMessage, Label, Message};
use crate::error::{Result, SpamLensError};

/// Header of the label column.
pub const LABEL_COLUMN: &str = "label";

/// Header of the message column.
pub const MESSAGE_COLUMN: &str = "message";

/// A row that could not be turned into a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// 1-based line number in the file.
    pub line: u64,

    /// Why the row was rejected.
    pub reason: String,
}

/// Messages read from a corpus file, plus the rows that were skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    pub messages: Vec<Message>,
    pub rejected: Vec<RejectedRecord>,
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Read a labeled corpus from CSV.
///
/// A missing `label` or `message` header is a data error for the whole
/// input. Rows with an unknown label or too few fields are reported in
/// [`LoadedCorpus::rejected`].
pub fn read_corpus<R: Read>(reader: R) -> Result<LoadedCorpus> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| decode_latin1(h).trim().to_string())
        .collect();
    let column = |name: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            SpamLensError::data(format!(
                "Missing '{name}' column (found: {})",
                headers.join(", ")
            ))
        })
    };
    let label_column = column(LABEL_COLUMN)?;
    let message_column = column(MESSAGE_COLUMN)?;

    let mut corpus = LoadedCorpus::default();
    for record in reader.byte_records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let (Some(label), Some(text)) = (record.get(label_column), record.get(message_column))
        else {
            corpus.rejected.push(RejectedRecord {
                line,
                reason: format!("expected at least {} fields", label_column.max(message_column) + 1),
            });
            continue;
        };

        match decode_latin1(label).parse::<Label>() {
            Ok(label) => corpus.messages.push(Message::new(decode_latin1(text), label)),
            Err(e) => corpus.rejected.push(RejectedRecord {
                line,
                reason: e.to_string(),
            }),
        }
    }

    for rejected in &corpus.rejected {
        warn!("Skipping line {}: {}", rejected.line, rejected.reason);
    }

    Ok(corpus)
}

/// Read a labeled corpus from a CSV file.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<LoadedCorpus> {
    let path = path.as_ref();
    let corpus = read_corpus(File::open(path)?)?;
    info!(
        "Loaded {} messages from {} ({} rejected)",
        corpus.messages.len(),
        path.display(),
        corpus.rejected.len()
    );
    Ok(corpus)
}

/// Write cleaned messages as `label,message` CSV.
pub fn write_cleaned_csv<W: Write>(messages: &[CleanedMessage], writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record([LABEL_COLUMN, MESSAGE_COLUMN])?;
    for message in messages {
        writer.write_record([message.label.as_str(), message.text.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write cleaned messages to a CSV file.
pub fn save_cleaned_csv<P: AsRef<Path>>(messages: &[CleanedMessage], path: P) -> Result<()> {
    let path = path.as_ref();
    write_cleaned_csv(messages, File::create(path)?)?;
    info!("Wrote {} cleaned messages to {}", messages.len(), path.display());
    Ok(())
}
