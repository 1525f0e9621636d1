//! Append-only interaction history
//!
//! One JSON object per line: `{"kind": ..., "timestamp": ..., "content": ...}`.
//! Callers treat recording as best effort; see [`InteractionLog::record_or_warn`].

use crate::error::{Result, SelectorError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// What a history entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Question,
    Response,
    Prediction,
    Error,
}

/// A single history line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub kind: InteractionKind,
    pub timestamp: DateTime<Utc>,
    pub content: Value,
}

impl InteractionRecord {
    pub fn new(kind: InteractionKind, content: Value) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
            content,
        }
    }
}

/// JSON-lines history file
#[derive(Debug, Clone)]
pub struct InteractionLog {
    path: PathBuf,
}

impl InteractionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file (and its directory) when missing
    pub fn record(&self, kind: InteractionKind, content: Value) -> Result<()> {
        let record = InteractionRecord::new(kind, content);
        let line = serde_json::to_string(&record)
            .map_err(|e| SelectorError::History(format!("Failed to encode entry: {}", e)))?;

        self.append_line(&line).map_err(|e| {
            SelectorError::History(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Like [`InteractionLog::record`], but a failure is only logged
    pub fn record_or_warn(&self, kind: InteractionKind, content: Value) {
        if let Err(e) = self.record(kind, content) {
            log::warn!("Interaction not recorded: {}", e);
        }
    }

    fn append_line(&self, line: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }

    /// Read every well-formed entry; a missing file is an empty history
    pub fn load(&self) -> Result<Vec<InteractionRecord>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SelectorError::History(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let mut records = Vec::new();
        for (number, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(record) => records.push(record),
                Err(e) => log::debug!("Skipping history line {}: {}", number + 1, e),
            }
        }
        Ok(records)
    }
}
