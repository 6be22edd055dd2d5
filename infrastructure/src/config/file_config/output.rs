//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// JSON document whose `runtime` field receives the result log
    pub results_path: PathBuf,
    /// JSONL transcript of every deliberation event; disabled when unset
    pub transcript_path: Option<PathBuf>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from("data/data_out.json"),
            transcript_path: None,
            color: true,
        }
    }
}
