//! Commands driving the round table and the activity they put it in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded, immutable instruction for the command processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Run one full round on the current topic.
    StartRound,
    /// Add a proposal to the latest round's slate and vote again.
    InjectProposal(String),
    /// Append a memory to one participant (0-based ordinal).
    AppendMemory { participant: usize, text: String },
}

impl Command {
    /// Short name used in logs and transcripts.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::StartRound => "start",
            Command::InjectProposal(_) => "chat_in_round",
            Command::AppendMemory { .. } => "add_memory",
        }
    }

    /// Activity the processor enters while this command runs.
    pub fn activity(&self) -> Activity {
        match self {
            Command::StartRound => Activity::RunningFullRound,
            Command::InjectProposal(_) => Activity::InjectingProposal,
            Command::AppendMemory { .. } => Activity::AppendingMemory,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::StartRound => write!(f, "start"),
            Command::InjectProposal(text) => write!(f, "chat_in_round({text:?})"),
            Command::AppendMemory { participant, text } => {
                write!(f, "add_memory(#{participant}, {text:?})")
            }
        }
    }
}

/// What the command processor is doing right now.
///
/// Published for observers only; scheduling never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    #[default]
    Idle,
    RunningFullRound,
    InjectingProposal,
    AppendingMemory,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Idle => "idle",
            Activity::RunningFullRound => "running full round",
            Activity::InjectingProposal => "injecting proposal",
            Activity::AppendingMemory => "appending memory",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Activity::Idle)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
