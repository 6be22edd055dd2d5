//! Command loop configuration from TOML (`[processor]` and `[listener]`)

use roundtable_application::ProcessorParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorConfig {
    /// Idle wait before re-checking the round budget
    pub poll_interval_ms: u64,
}

impl Default for FileProcessorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

impl FileProcessorConfig {
    pub fn to_params(&self) -> ProcessorParams {
        ProcessorParams::default().with_poll_interval(Duration::from_millis(self.poll_interval_ms))
    }
}

/// UDP command listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileListenerConfig {
    pub enabled: bool,
    /// Socket address to bind, e.g. `127.0.0.1:5005`
    pub bind: String,
}

impl Default for FileListenerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind: "127.0.0.1:5005".to_string(),
        }
    }
}
