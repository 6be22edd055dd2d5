//! Participant memory adapters

mod vector_memory;

pub use vector_memory::{VectorMemory, cosine_similarity};
