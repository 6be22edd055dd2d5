//! Application layer for roundtable
//!
//! This crate contains use cases, port definitions, the command queue and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod participant;
pub mod ports;
pub mod queue;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{ProcessorParams, VotingParams};
pub use participant::{CastVote, Participant, ParticipantError};
pub use ports::{
    command_source::{CommandSource, SourceError},
    llm_gateway::{Embedder, GatewayError, TextGenerator},
    memory_store::{MemoryError, MemoryStore},
    progress::{NoProgress, RoundProgressNotifier},
    result_store::{PersistenceError, ResultStore},
    transcript_logger::{NoTranscript, TranscriptEvent, TranscriptLogger},
};
pub use queue::{CommandReceiver, CommandSender, QueueClosed, WaitOutcome, command_queue};
pub use use_cases::command_processor::{CommandProcessor, ProcessorReport};
pub use use_cases::resolve_vote::{cast_votes, resolve_vote};
pub use use_cases::round_scheduler::{RoundError, RoundScheduler, SchedulerState};
