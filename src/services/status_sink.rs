//! Shared status log — capability layer.
//!
//! Every run, success or failure, leaves exactly one entry keyed by its
//! start and end timestamps. The file sink appends JSON lines so the shared
//! log stays append-only across runs.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AppResult, FileError};

/// One status entry of a finished (or failed) run.
#[derive(Debug, Clone, Serialize)]
pub struct StatusEntry {
    /// Sheet/category label the entry files under.
    pub category: String,
    pub run_started: String,
    pub run_finished: String,
    /// Flat summary fields (counts, export paths, per-variant messages).
    pub fields: BTreeMap<String, JsonValue>,
    /// Error log path, for context when a run failed.
    pub error_log: String,
}

/// Destination for run status entries.
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn append(&self, entry: &StatusEntry) -> AppResult<()>;
}

/// Appends entries to a local JSON-lines file.
pub struct FileStatusSink {
    path: PathBuf,
}

impl FileStatusSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StatusSink for FileStatusSink {
    async fn append(&self, entry: &StatusEntry) -> AppResult<()> {
        debug!(
            "appending status entry for run {} → {}",
            entry.run_started, entry.run_finished
        );
        let line = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| FileError::write(self.path.display().to_string(), e))?;
        writeln!(file, "{line}").map_err(|e| FileError::write(self.path.display().to_string(), e))?;
        Ok(())
    }
}
