//! Inbound command wire format.
//!
//! Each message is a JSON object with a `command` field:
//!
//! ```json
//! {"command": "start"}
//! {"command": "chat_in_round", "content": "Build a solar-powered tram line"}
//! {"command": "add_memory", "content": {"agent_number": "0", "memory": "I dislike cars"}}
//! ```
//!
//! Decoding is pure; range checks against the actual roster happen when the
//! command is dispatched.

use super::entities::Command;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw envelope before the payload is interpreted.
#[derive(Debug, Deserialize)]
struct Envelope {
    command: String,
    #[serde(default)]
    content: Option<Value>,
}

/// Payload of an `add_memory` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryPayload {
    /// Participant ordinal, sent as a string (`"0"`); bare numbers are accepted too.
    pub agent_number: Value,
    pub memory: String,
}

/// Decode one wire message from raw bytes.
pub fn decode_command_bytes(bytes: &[u8]) -> Result<Command, DomainError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| DomainError::InvalidCommand(format!("malformed JSON: {e}")))?;
    decode_command(&value)
}

/// Decode one wire message.
pub fn decode_command(value: &Value) -> Result<Command, DomainError> {
    let envelope: Envelope = serde_json::from_value(value.clone())
        .map_err(|e| DomainError::InvalidCommand(format!("bad envelope: {e}")))?;

    match envelope.command.as_str() {
        "start" => Ok(Command::StartRound),
        "chat_in_round" => match envelope.content {
            Some(Value::String(text)) if !text.trim().is_empty() => {
                Ok(Command::InjectProposal(text))
            }
            Some(Value::String(_)) => Err(DomainError::InvalidCommand(
                "chat_in_round content is empty".to_string(),
            )),
            _ => Err(DomainError::InvalidCommand(
                "chat_in_round requires string content".to_string(),
            )),
        },
        "add_memory" => {
            let content = envelope.content.ok_or_else(|| {
                DomainError::InvalidCommand("add_memory requires content".to_string())
            })?;
            let payload: MemoryPayload = serde_json::from_value(content)
                .map_err(|e| DomainError::InvalidCommand(format!("bad add_memory content: {e}")))?;
            let participant = parse_agent_number(&payload.agent_number)?;
            Ok(Command::AppendMemory {
                participant,
                text: payload.memory,
            })
        }
        other => Err(DomainError::InvalidCommand(format!(
            "unknown command '{other}'"
        ))),
    }
}

/// Encode a command into its wire form.
pub fn encode_command(command: &Command) -> Value {
    match command {
        Command::StartRound => serde_json::json!({ "command": "start" }),
        Command::InjectProposal(text) => {
            serde_json::json!({ "command": "chat_in_round", "content": text })
        }
        Command::AppendMemory { participant, text } => serde_json::json!({
            "command": "add_memory",
            "content": { "agent_number": participant.to_string(), "memory": text }
        }),
    }
}

fn parse_agent_number(value: &Value) -> Result<usize, DomainError> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<usize>().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        _ => None,
    };
    parsed.ok_or_else(|| {
        DomainError::InvalidCommand(format!(
            "agent_number must be a non-negative integer, got {value}"
        ))
    })
}
