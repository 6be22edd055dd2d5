//! Scripted command feed.
//!
//! Pushes a fixed list of commands, in order, then stops. The list comes
//! from a file of wire messages, either one JSON array or one JSON object per
//! line. Messages that do not decode are logged and skipped when the file is
//! read.

use async_trait::async_trait;
use roundtable_application::ports::command_source::{CommandSource, SourceError};
use roundtable_application::queue::CommandSender;
use roundtable_domain::{Command, decode_command};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct ScriptedCommandSource {
    commands: Vec<Command>,
    delay: Option<Duration>,
}

impl ScriptedCommandSource {
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands,
            delay: None,
        }
    }

    /// Wait `delay` between pushes
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Read a command script from `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::new(parse_script(&content)))
    }
}

/// Decode a JSON array or JSON-lines script, skipping undecodable messages
pub fn parse_script(content: &str) -> Vec<Command> {
    let messages: Vec<Result<Value, String>> = match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(items)) => items.into_iter().map(Ok).collect(),
        _ => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(|e| e.to_string()))
            .collect(),
    };

    messages
        .into_iter()
        .enumerate()
        .filter_map(|(i, message)| {
            match message.and_then(|value| decode_command(&value).map_err(|e| e.to_string())) {
                Ok(command) => Some(command),
                Err(e) => {
                    warn!("Skipping scripted message {}: {}", i + 1, e);
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl CommandSource for ScriptedCommandSource {
    fn name(&self) -> &str {
        "script"
    }

    async fn run(
        self: Box<Self>,
        queue: CommandSender,
        cancel: CancellationToken,
    ) -> Result<(), SourceError> {
        let Self { commands, delay } = *self;
        info!("Feeding {} scripted command(s)", commands.len());
        for command in commands {
            if cancel.is_cancelled() {
                debug!("Scripted feed cancelled");
                return Ok(());
            }
            queue.push(command).map_err(|_| SourceError::QueueClosed)?;
            if let Some(delay) = delay {
                tokio::select! {
                    _ = cancel.cancelled() => return Ok(()),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_application::queue::command_queue;

    #[test]
    fn test_parse_json_array() {
        let commands = parse_script(
            r#"[
                {"command": "start"},
                {"command": "chat_in_round", "content": "Solar city"},
                {"command": "add_memory", "content": {"agent_number": "0", "memory": "I like my opinion"}}
            ]"#,
        );
        assert_eq!(
            commands,
            vec![
                Command::StartRound,
                Command::InjectProposal("Solar city".into()),
                Command::AppendMemory {
                    participant: 0,
                    text: "I like my opinion".into()
                },
            ]
        );
    }

    #[test]
    fn test_parse_json_lines_skips_bad_messages() {
        let commands = parse_script(
            "{\"command\": \"start\"}\n\n{\"command\": \"dance\"}\nnot json\n{\"command\": \"start\"}\n",
        );
        assert_eq!(commands, vec![Command::StartRound, Command::StartRound]);
    }

    #[tokio::test]
    async fn test_run_pushes_in_order() {
        let script = vec![
            Command::StartRound,
            Command::InjectProposal("X".into()),
            Command::StartRound,
        ];
        let (tx, mut rx) = command_queue();
        Box::new(ScriptedCommandSource::new(script.clone()))
            .run(tx, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(rx.drain(), script);
    }

    #[tokio::test]
    async fn test_cancelled_feed_pushes_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (tx, mut rx) = command_queue();
        Box::new(ScriptedCommandSource::new(vec![Command::StartRound]))
            .run(tx, cancel)
            .await
            .unwrap();
        assert!(rx.drain().is_empty());
    }

    #[tokio::test]
    async fn test_closed_queue_stops_feed() {
        let (tx, rx) = command_queue();
        drop(rx);
        let err = Box::new(ScriptedCommandSource::new(vec![Command::StartRound]))
            .run(tx, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::QueueClosed));
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            ScriptedCommandSource::from_file("/no/such/script.json"),
            Err(SourceError::Transport(_))
        ));
    }
}
