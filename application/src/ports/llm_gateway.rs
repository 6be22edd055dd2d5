//! LLM Gateway port
//!
//! Defines the interface for the text-generation and embedding backends that
//! participants think with.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Free-text generation backend
///
/// One call, one completion. Retrying is a decision of the caller; a failed
/// call aborts whatever command was using it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier, for logs
    fn model(&self) -> &str;

    /// Generate a completion for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// Embedding backend used by vector memory
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed `text` into a dense vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError>;
}
