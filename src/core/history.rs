//! Durable conversation memory.
//!
//! The log is stored as one JSON array of `[role, text, timestamp, metadata]`
//! tuples. Loading never fails: a missing or damaged file simply starts a
//! fresh conversation.

use crate::core::config::data::path_display;
use crate::core::message::{AnswerMeta, Message, Role};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Number of trailing messages kept on every write.
pub const MAX_HISTORY_MESSAGES: usize = 500;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredMeta {
    #[serde(default, alias = "full_text", skip_serializing_if = "Option::is_none")]
    full: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remainder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

type StoredEntry = (Role, String, String, StoredMeta);

fn to_entry(message: &Message) -> StoredEntry {
    let meta = match &message.answer {
        Some(answer) => StoredMeta {
            full: Some(answer.full_text.clone()),
            remainder: answer.remainder.clone(),
            error: answer.diagnostic.clone(),
        },
        None => StoredMeta::default(),
    };
    (
        message.role,
        message.text.clone(),
        message.timestamp.clone(),
        meta,
    )
}

fn from_entry((role, text, timestamp, meta): StoredEntry) -> Message {
    // A remainder is meaningless without the answer it was cut from.
    let answer = meta.full.map(|full_text| AnswerMeta {
        full_text,
        remainder: meta.remainder,
        diagnostic: meta.error,
    });
    Message {
        role,
        text,
        timestamp,
        answer,
    }
}

/// Errors raised while writing the history file.
#[derive(Debug)]
pub enum HistoryError {
    Serialize(serde_json::Error),
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Serialize(source) => {
                write!(f, "Could not encode conversation history: {source}")
            }
            HistoryError::Write { path, source } => {
                write!(f, "Could not save memory to {}: {}", path_display(path), source)
            }
        }
    }
}

impl StdError for HistoryError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            HistoryError::Serialize(source) => Some(source),
            HistoryError::Write { source, .. } => Some(source),
        }
    }
}

/// File-backed message store.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Vec<Message> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "No readable history, starting fresh");
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<serde_json::Value>(&contents) {
            Ok(serde_json::Value::Array(entries)) => entries,
            Ok(_) => {
                debug!(path = %self.path.display(), "History is not a list, starting fresh");
                return Vec::new();
            }
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "History is not valid JSON, starting fresh");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<StoredEntry>(value) {
                Ok(entry) => Some(from_entry(entry)),
                Err(err) => {
                    debug!(index, error = %err, "Skipping undecodable history entry");
                    None
                }
            })
            .collect()
    }

    /// Overwrite the file with the trailing [`MAX_HISTORY_MESSAGES`] entries.
    pub fn save(&self, messages: &[Message]) -> Result<(), HistoryError> {
        let start = messages.len().saturating_sub(MAX_HISTORY_MESSAGES);
        let entries: Vec<StoredEntry> = messages[start..].iter().map(to_entry).collect();
        let contents = serde_json::to_string_pretty(&entries).map_err(HistoryError::Serialize)?;

        self.write_atomically(contents.as_bytes())
            .map_err(|source| HistoryError::Write {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = entries.len(), "Saved history");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), HistoryError> {
        self.save(&[])
    }

    fn write_atomically(&self, bytes: &[u8]) -> std::io::Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new_in(".")?,
        };
        temp_file.write_all(bytes)?;
        temp_file.as_file_mut().sync_all()?;
        temp_file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}
