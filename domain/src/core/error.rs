//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No participants configured")]
    NoParticipants,

    #[error("No votes were cast")]
    NoVotes,

    #[error("Cannot resolve a vote over an empty slate")]
    EmptySlate,

    #[error("Vote {vote} is outside the slate of {options} options")]
    VoteOutOfRange { vote: usize, options: usize },

    #[error("Expected {expected} votes, got {actual}")]
    VoteCountMismatch { expected: usize, actual: usize },

    #[error("Cannot inject a proposal before any round has completed")]
    EmptyResultLog,

    #[error("Participant {index} does not exist ({count} participants)")]
    ParticipantOutOfRange { index: usize, count: usize },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl DomainError {
    /// Errors that describe a command which cannot apply to the current state.
    ///
    /// Such commands are dropped without touching any state.
    pub fn is_invalid_command_state(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyResultLog | DomainError::ParticipantOutOfRange { .. }
        )
    }
}
