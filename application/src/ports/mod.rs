//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod command_source;
pub mod llm_gateway;
pub mod memory_store;
pub mod progress;
pub mod result_store;
pub mod transcript_logger;
