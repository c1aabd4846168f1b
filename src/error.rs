//! Central error types.
//!
//! One top-level [`AppError`] fanning out into per-domain errors, so callers
//! can match on the domain without knowing which layer produced the failure.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// GUI scripting session errors (bridge transport, startup, controls).
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    /// Extracted order data errors.
    #[error("data error: {0}")]
    Data(#[from] DataError),
    /// File operation errors.
    #[error("file error: {0}")]
    File(#[from] FileError),
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Wrapper for errors that fit no other domain.
    #[error("{0}")]
    Other(String),
}

/// Errors talking to the GUI scripting bridge.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No ready session handle for the slot within the startup timeout.
    #[error("session slot {slot} not ready within {timeout_secs}s")]
    StartupTimeout { slot: usize, timeout_secs: u64 },
    /// Transport-level failure of one bridge call.
    #[error("bridge call '{op}' failed: {source}")]
    Transport {
        op: String,
        #[source]
        source: reqwest::Error,
    },
    /// The bridge accepted the call but the scripting host rejected it.
    #[error("bridge rejected '{op}': {message}")]
    Rejected { op: String, message: String },
    /// The bridge answered with a payload we could not decode.
    #[error("bridge reply for '{op}' not decodable: {source}")]
    Decode {
        op: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors in the rows extracted from the order list.
#[derive(Debug, Error)]
pub enum DataError {
    /// The extraction result lacks a column of the fixed schema.
    #[error("extracted table is missing column '{column}'")]
    MissingColumn { column: String },
    /// A numeric cell could not be parsed.
    #[error("column '{column}' holds non-numeric value '{value}'")]
    InvalidNumber { column: String, value: String },
    /// Column lists of one table differ in length.
    #[error("table is not rectangular: column '{column}' has {actual} rows, expected {expected}")]
    RaggedTable {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// File operation errors.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML '{path}': {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write CSV '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var} holds '{value}', expected {expected}")]
    EnvVarParse {
        var: String,
        value: String,
        expected: &'static str,
    },
    #[error("no variants configured, nothing to dispatch")]
    EmptyVariantList,
}

// ========== Conversions from common library errors ==========

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::Write {
            path: String::new(),
            source: err,
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Other(format!("JSON error: {err}"))
    }
}

// ========== Convenience constructors ==========

impl AppError {
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }
}

impl FileError {
    pub fn read(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::Write {
            path: path.into(),
            source,
        }
    }
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;
