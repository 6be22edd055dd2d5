//! LLM backend configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

/// Raw LLM configuration from TOML
///
/// # Example
///
/// ```toml
/// [llm]
/// endpoint = "http://localhost:11434"
/// model = "phi3"
/// embedding_model = "phi3"
/// timeout_seconds = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Base URL of the Ollama server
    pub endpoint: String,
    /// Model used for proposals, votes and topics
    pub model: String,
    /// Model used for memory embeddings
    pub embedding_model: String,
    /// Per-request timeout; `None` waits as long as the server takes
    pub timeout_seconds: Option<u64>,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "phi3".to_string(),
            embedding_model: "phi3".to_string(),
            timeout_seconds: None,
        }
    }
}
