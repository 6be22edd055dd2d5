//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and scenario loading.

pub mod command_source;
pub mod config;
pub mod llm;
pub mod logging;
pub mod memory;
pub mod persistence;

// Re-export commonly used types
pub use command_source::{ScriptedCommandSource, UdpCommandSource};
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileListenerConfig, FileLlmConfig,
    FileOutputConfig, FileProcessorConfig, FileVotingConfig, ScenarioAgent, ScenarioConfig,
    ScenarioError,
};
pub use llm::{OllamaEmbedder, OllamaGenerator};
pub use logging::JsonlTranscriptLogger;
pub use memory::VectorMemory;
pub use persistence::JsonResultStore;
