//! Participant: a persona with a generation backend and its own memory.
//!
//! Proposing is a single generation call. Voting parses the first number in
//! the answer and retries on unusable answers; when every attempt fails the
//! participant falls back to a uniformly random choice and remembers that it
//! did. Both outcomes are written to memory with the slate they were cast on.

use crate::ports::llm_gateway::{GatewayError, TextGenerator};
use crate::ports::memory_store::{MemoryError, MemoryStore};
use crate::ports::transcript_logger::{NoTranscript, TranscriptEvent, TranscriptLogger};
use rand::Rng;
use roundtable_domain::{
    DomainError, MemoryEntry, ParticipantId, ParticipantProfile, PromptTemplate,
    parse_vote_choice,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors a participant surfaces to its caller
#[derive(Error, Debug)]
pub enum ParticipantError {
    #[error("{participant}: generation failed: {source}")]
    Generation {
        participant: String,
        #[source]
        source: GatewayError,
    },

    #[error("{participant}: memory failed: {source}")]
    Memory {
        participant: String,
        #[source]
        source: MemoryError,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A cast vote and how it was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastVote {
    /// 1-based index into the slate the vote was cast on
    pub choice: usize,
    /// Generation attempts consumed
    pub attempts: usize,
    /// True when the choice was drawn at random after every attempt failed
    pub fallback: bool,
}

pub struct Participant {
    profile: ParticipantProfile,
    generator: Arc<dyn TextGenerator>,
    memory: Box<dyn MemoryStore>,
    recall_limit: usize,
    transcript: Arc<dyn TranscriptLogger>,
}

impl Participant {
    pub fn new(
        profile: ParticipantProfile,
        generator: Arc<dyn TextGenerator>,
        memory: Box<dyn MemoryStore>,
    ) -> Self {
        Self {
            profile,
            generator,
            memory,
            recall_limit: 5,
            transcript: Arc::new(NoTranscript),
        }
    }

    pub fn with_recall_limit(mut self, limit: usize) -> Self {
        self.recall_limit = limit;
        self
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn profile(&self) -> &ParticipantProfile {
        &self.profile
    }

    pub fn id(&self) -> ParticipantId {
        self.profile.id
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    /// Raw generation call with this participant's backend
    pub async fn generate(&self, prompt: &str) -> Result<String, ParticipantError> {
        self.generator
            .generate(prompt)
            .await
            .map(|text| text.trim().to_string())
            .map_err(|source| ParticipantError::Generation {
                participant: self.profile.name.clone(),
                source,
            })
    }

    /// Propose an idea for `topic`
    pub async fn propose(&mut self, topic: &str) -> Result<String, ParticipantError> {
        let memories = self.recall_relevant(topic, self.recall_limit).await?;
        let prompt = PromptTemplate::proposal(&self.profile, &memories, topic);
        let proposal = self.generate(&prompt).await?;
        debug!("{} proposed: {}", self.profile.name, proposal);

        self.add_memory(&MemoryEntry::proposed(topic, &proposal))
            .await?;
        self.transcript.log(TranscriptEvent::new(
            "proposal",
            serde_json::json!({
                "participant": self.profile.name,
                "topic": topic,
                "proposal": proposal,
            }),
        ));
        Ok(proposal)
    }

    /// Vote for one of `options`, retrying up to `max_attempts` times
    pub async fn vote(
        &mut self,
        options: &[String],
        max_attempts: usize,
    ) -> Result<CastVote, ParticipantError> {
        if options.is_empty() {
            return Err(DomainError::EmptySlate.into());
        }

        let query = PromptTemplate::vote_recall_query(options);
        let memories = self.recall_relevant(&query, self.recall_limit).await?;
        let prompt = PromptTemplate::vote(&self.profile, &memories, options);

        for attempt in 1..=max_attempts {
            let response = self.generate(&prompt).await?;
            match parse_vote_choice(&response, options.len()) {
                Ok(choice) => {
                    debug!("{} voted {} (attempt {})", self.profile.name, choice, attempt);
                    self.add_memory(&MemoryEntry::voted(choice, options)).await?;
                    self.log_vote("vote", choice, attempt, options);
                    return Ok(CastVote {
                        choice,
                        attempts: attempt,
                        fallback: false,
                    });
                }
                Err(e) => {
                    warn!(
                        "{} failed to vote (attempt {}/{}): {}",
                        self.profile.name, attempt, max_attempts, e
                    );
                }
            }
        }

        let choice = random_choice(options.len());
        warn!(
            "{} gave no usable vote after {} attempts; choosing {} at random",
            self.profile.name, max_attempts, choice
        );
        self.add_memory(&MemoryEntry::vote_fallback(choice, options))
            .await?;
        self.log_vote("vote_fallback", choice, max_attempts, options);
        Ok(CastVote {
            choice,
            attempts: max_attempts,
            fallback: true,
        })
    }

    /// Turn a winning proposal into the next topic
    pub async fn summarize_topic(
        &self,
        winning_proposal: &str,
        environment: &str,
    ) -> Result<String, ParticipantError> {
        self.generate(&PromptTemplate::next_topic(winning_proposal, environment))
            .await
    }

    pub async fn add_memory(&mut self, text: &str) -> Result<(), ParticipantError> {
        self.memory
            .add(text)
            .await
            .map_err(|source| ParticipantError::Memory {
                participant: self.profile.name.clone(),
                source,
            })
    }

    pub async fn recall_relevant(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>, ParticipantError> {
        self.memory
            .recall_relevant(query, k)
            .await
            .map_err(|source| ParticipantError::Memory {
                participant: self.profile.name.clone(),
                source,
            })
    }

    fn log_vote(&self, event_type: &'static str, choice: usize, attempts: usize, options: &[String]) {
        self.transcript.log(TranscriptEvent::new(
            event_type,
            serde_json::json!({
                "participant": self.profile.name,
                "choice": choice,
                "attempts": attempts,
                "options": options,
            }),
        ));
    }
}

impl std::fmt::Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("profile", &self.profile)
            .field("model", &self.generator.model())
            .field("memories", &self.memory.len())
            .finish()
    }
}

/// Uniform 1-based pick out of `options`
pub(crate) fn random_choice(options: usize) -> usize {
    rand::rng().random_range(1..=options)
}
