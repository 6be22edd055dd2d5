//! Domain layer for roundtable
//!
//! This crate contains the core rules of round-table deliberation: round
//! records, vote resolution, commands and prompts. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Round
//!
//! Every participant proposes an idea for the current topic, everybody votes,
//! and the plurality winner seeds the next topic. The outcome is an immutable
//! [`RoundRecord`] appended to the [`ResultLog`].
//!
//! ## Injection
//!
//! An external proposal added to the latest round's slate. It triggers a
//! fresh vote and a new record counted `n + 0.5`.
//!
//! ## Restricted revote
//!
//! Ties are broken by voting again over the tied options only
//! ([`VoteResolver`]).

pub mod command;
pub mod core;
pub mod participant;
pub mod prompt;
pub mod round;
pub mod vote;

// Re-export commonly used types
pub use command::{Activity, Command, decode_command, decode_command_bytes, encode_command};
pub use core::error::DomainError;
pub use participant::{ParticipantId, ParticipantProfile};
pub use prompt::{MemoryEntry, PromptTemplate};
pub use round::{ResultLog, RoundCount, RoundRecord};
pub use vote::{
    PassOutcome, Resolution, ResolverStep, Tally, VoteParseError, VoteResolver, parse_vote_choice,
    resolve_pass, tally,
};
