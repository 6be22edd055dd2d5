//! LLM backends

mod ollama;

pub use ollama::{OllamaEmbedder, OllamaGenerator};
