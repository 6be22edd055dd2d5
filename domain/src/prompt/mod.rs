//! Prompt construction for participant generation calls.

pub mod template;

pub use template::{MemoryEntry, PromptTemplate};
