//! Result store port
//!
//! Persists the whole [`ResultLog`] after every change. A save replaces the
//! previously persisted log entirely.

use roundtable_domain::ResultLog;
use thiserror::Error;

/// Errors raised while reading or writing persisted results
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Could not encode results: {0}")]
    Encode(String),
}

/// Port for persisting the result log
pub trait ResultStore: Send + Sync {
    /// Overwrite the persisted log with `log`
    fn save(&self, log: &ResultLog) -> Result<(), PersistenceError>;

    /// Read back the persisted log (empty when nothing was saved yet)
    fn load(&self) -> Result<ResultLog, PersistenceError>;

    /// Human-readable location, for logs
    fn location(&self) -> String;
}

