//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application parameters
//! where the application has its own types.

mod llm;
mod output;
mod processor;
mod voting;

pub use llm::FileLlmConfig;
pub use output::FileOutputConfig;
pub use processor::{FileListenerConfig, FileProcessorConfig};
pub use voting::FileVotingConfig;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;

/// Configuration values that deserialize but cannot be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("llm.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("{field}: model name cannot be empty")]
    EmptyModelName { field: &'static str },

    #[error("llm.endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("voting.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("processor.poll_interval_ms must be at least 1")]
    ZeroPollInterval,

    #[error("listener.bind: '{0}' is not a socket address")]
    InvalidBindAddress(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Text generation and embedding backend
    pub llm: FileLlmConfig,
    /// Vote retries and tie handling
    pub voting: FileVotingConfig,
    /// Command loop
    pub processor: FileProcessorConfig,
    /// UDP command listener
    pub listener: FileListenerConfig,
    /// Result file, transcript and terminal output
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, reporting the first unusable value.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.llm.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.llm.endpoint.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint);
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName { field: "llm.model" });
        }
        if self.llm.embedding_model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName {
                field: "llm.embedding_model",
            });
        }
        if self.voting.max_attempts == 0 {
            return Err(ConfigValidationError::ZeroAttempts);
        }
        if self.processor.poll_interval_ms == 0 {
            return Err(ConfigValidationError::ZeroPollInterval);
        }
        self.listener_addr()?;
        Ok(())
    }

    /// Parsed listener bind address
    pub fn listener_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        self.listener
            .bind
            .parse()
            .map_err(|_| ConfigValidationError::InvalidBindAddress(self.listener.bind.clone()))
    }
}
