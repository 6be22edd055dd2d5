//! Memory store port
//!
//! Each participant owns one append-only memory. Relevance ranking is the
//! store's business; the core only asks for the `k` best matches.

use super::llm_gateway::GatewayError;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a memory store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Embedding failed: {0}")]
    Embedding(#[from] GatewayError),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Append-only, recall-by-relevance memory of one participant
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Append one memory
    async fn add(&mut self, text: &str) -> Result<(), MemoryError>;

    /// Up to `k` stored memories, most relevant to `query` first
    async fn recall_relevant(&self, query: &str, k: usize) -> Result<Vec<String>, MemoryError>;

    /// Number of stored memories
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
