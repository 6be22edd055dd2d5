//! Test doubles shared by the application unit tests.

use crate::ports::llm_gateway::{GatewayError, TextGenerator};
use crate::ports::memory_store::{MemoryError, MemoryStore};
use crate::ports::result_store::{PersistenceError, ResultStore};
use crate::ports::transcript_logger::{TranscriptEvent, TranscriptLogger};
use async_trait::async_trait;
use roundtable_domain::{ParticipantProfile, ResultLog};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub fn profile(id: usize, name: &str) -> ParticipantProfile {
    ParticipantProfile::new(id, name, 30 + id as u32, "city planner", "curious", "a river city")
}

/// A scripted response
#[derive(Debug, Clone)]
enum Scripted {
    Text(String),
    Error(String),
}

#[derive(Default)]
struct Queues {
    proposals: VecDeque<Scripted>,
    votes: VecDeque<Scripted>,
    topics: VecDeque<Scripted>,
}

/// Generator that answers from per-kind queues.
///
/// Prompts are classified as vote, topic or proposal by their wording; an
/// exhausted queue falls back to a fixed answer ("1" for votes).
#[derive(Default)]
pub struct ScriptedGenerator {
    queues: Mutex<Queues>,
    prompts: Arc<Mutex<Vec<String>>>,
    fail_votes: bool,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn proposals<const N: usize>(self, texts: [&str; N]) -> Self {
        self.queues
            .lock()
            .unwrap()
            .proposals
            .extend(texts.iter().map(|t| Scripted::Text(t.to_string())));
        self
    }

    pub fn votes<const N: usize>(self, texts: [&str; N]) -> Self {
        self.queues
            .lock()
            .unwrap()
            .votes
            .extend(texts.iter().map(|t| Scripted::Text(t.to_string())));
        self
    }

    pub fn topics<const N: usize>(self, texts: [&str; N]) -> Self {
        self.queues
            .lock()
            .unwrap()
            .topics
            .extend(texts.iter().map(|t| Scripted::Text(t.to_string())));
        self
    }

    pub fn failing_proposal(self) -> Self {
        self.queues
            .lock()
            .unwrap()
            .proposals
            .push_back(Scripted::Error("backend down".to_string()));
        self
    }

    pub fn failing_votes(mut self) -> Self {
        self.fail_votes = true;
        self
    }

    /// Every prompt received, in order
    pub fn prompt_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }

    fn answer(next: Option<Scripted>, fallback: &str) -> Result<String, GatewayError> {
        match next {
            Some(Scripted::Text(text)) => Ok(text),
            Some(Scripted::Error(e)) => Err(GatewayError::RequestFailed(e)),
            None => Ok(fallback.to_string()),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut queues = self.queues.lock().unwrap();
        if prompt.contains("Which proposal do you vote for?") {
            if self.fail_votes {
                return Err(GatewayError::Timeout);
            }
            Self::answer(queues.votes.pop_front(), "1")
        } else if prompt.contains("generate a new topic") {
            Self::answer(queues.topics.pop_front(), "next topic")
        } else {
            Self::answer(queues.proposals.pop_front(), "a proposal")
        }
    }
}

/// Memory that records entries in a shared list; recall returns the most
/// recent entries first.
#[derive(Clone, Default)]
pub struct RecordingMemory {
    entries: Arc<Mutex<Vec<String>>>,
}

impl RecordingMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MemoryStore for RecordingMemory {
    async fn add(&mut self, text: &str) -> Result<(), MemoryError> {
        self.entries.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn recall_relevant(&self, _query: &str, k: usize) -> Result<Vec<String>, MemoryError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(k)
            .cloned()
            .collect())
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Result store keeping every saved snapshot in memory
#[derive(Default)]
pub struct MemoryResultStore {
    saves: Mutex<Vec<ResultLog>>,
    fail: bool,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            saves: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn saves(&self) -> Vec<ResultLog> {
        self.saves.lock().unwrap().clone()
    }
}

impl ResultStore for MemoryResultStore {
    fn save(&self, log: &ResultLog) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Io {
                path: "memory".to_string(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.saves.lock().unwrap().push(log.clone());
        Ok(())
    }

    fn load(&self) -> Result<ResultLog, PersistenceError> {
        Ok(self.saves.lock().unwrap().last().cloned().unwrap_or_default())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Transcript that keeps every event
#[derive(Default)]
pub struct RecordingTranscript {
    events: Mutex<Vec<TranscriptEvent>>,
}

impl RecordingTranscript {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type)
            .collect()
    }
}

impl TranscriptLogger for RecordingTranscript {
    fn log(&self, event: TranscriptEvent) {
        self.events.lock().unwrap().push(event);
    }
}
