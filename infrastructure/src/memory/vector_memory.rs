//! In-process vector memory.
//!
//! Every memory is embedded once on insertion and kept next to its text.
//! Recall embeds the query and ranks stored memories by cosine similarity.
//! Nothing survives the process; each run starts every participant with an
//! empty memory seeded from the scenario.

use async_trait::async_trait;
use roundtable_application::ports::llm_gateway::Embedder;
use roundtable_application::ports::memory_store::{MemoryError, MemoryStore};
use std::sync::Arc;
use tracing::trace;

struct Entry {
    text: String,
    embedding: Vec<f32>,
}

/// Memory of one participant, ranked by embedding similarity
pub struct VectorMemory<E: Embedder + ?Sized> {
    embedder: Arc<E>,
    entries: Vec<Entry>,
    dimension: Option<usize>,
}

impl<E: Embedder + ?Sized> VectorMemory<E> {
    pub fn new(embedder: Arc<E>) -> Self {
        Self {
            embedder,
            entries: Vec::new(),
            dimension: None,
        }
    }

    /// Embedding width, fixed by the first stored memory
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    fn check_dimension(&self, embedding: &[f32]) -> Result<(), MemoryError> {
        match self.dimension {
            Some(expected) if expected != embedding.len() => Err(MemoryError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// Cosine similarity; zero for empty or mismatched vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

#[async_trait]
impl<E: Embedder + ?Sized> MemoryStore for VectorMemory<E> {
    async fn add(&mut self, text: &str) -> Result<(), MemoryError> {
        let embedding = self.embedder.embed(text).await?;
        self.check_dimension(&embedding)?;
        self.dimension.get_or_insert(embedding.len());
        self.entries.push(Entry {
            text: text.to_string(),
            embedding,
        });
        Ok(())
    }

    async fn recall_relevant(&self, query: &str, k: usize) -> Result<Vec<String>, MemoryError> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        self.check_dimension(&query_embedding)?;

        let mut scored: Vec<(f32, &Entry)> = self
            .entries
            .iter()
            .map(|entry| (cosine_similarity(&query_embedding, &entry.embedding), entry))
            .collect();

        // Stable sort: equal scores keep insertion order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        trace!("Recalled {} of {} memories", scored.len(), self.entries.len());

        Ok(scored
            .into_iter()
            .map(|(_, entry)| entry.text.clone())
            .collect())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
