//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod command_processor;
pub mod resolve_vote;
pub mod round_scheduler;
