//! Round Scheduler
//!
//! Owns the round counter, the current topic and the result log, and runs
//! the two round-level flows:
//!
//! - **Full round**: every participant proposes on the current topic, the
//!   vote is resolved, a record with the next integer count is appended and
//!   persisted, the counter advances and participant 0 turns the winner into
//!   the next topic.
//! - **Injection**: an external proposal is appended to the latest record's
//!   slate, the vote is resolved again, and a new record counted `n + 0.5`
//!   is appended and persisted. The topic advances from the new winner; the
//!   counter does not move.
//!
//! The scheduler never acts on its own; the command processor calls it, one
//! command at a time.

use crate::config::VotingParams;
use crate::participant::{Participant, ParticipantError};
use crate::ports::progress::{NoProgress, RoundProgressNotifier};
use crate::ports::result_store::ResultStore;
use crate::ports::transcript_logger::{NoTranscript, TranscriptEvent, TranscriptLogger};
use crate::use_cases::resolve_vote::resolve_vote;
use futures::future::join_all;
use roundtable_domain::{DomainError, ResultLog, RoundCount, RoundRecord};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort a round-level command
#[derive(Error, Debug)]
pub enum RoundError {
    #[error(transparent)]
    Participant(#[from] ParticipantError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RoundError {
    /// True for commands that cannot apply to the current state; those are
    /// dropped without any state change.
    pub fn is_invalid_command_state(&self) -> bool {
        matches!(self, RoundError::Domain(e) if e.is_invalid_command_state())
    }
}

/// What the scheduler is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    RunningFullRound,
    RunningInjection,
}

pub struct RoundScheduler {
    participants: Vec<Participant>,
    topic: String,
    environment: String,
    current_round: u32,
    total_rounds: u32,
    log: ResultLog,
    store: Arc<dyn ResultStore>,
    params: VotingParams,
    state: SchedulerState,
    progress: Arc<dyn RoundProgressNotifier>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl RoundScheduler {
    pub fn new(
        participants: Vec<Participant>,
        topic: impl Into<String>,
        environment: impl Into<String>,
        total_rounds: u32,
        store: Arc<dyn ResultStore>,
    ) -> Result<Self, DomainError> {
        if participants.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        Ok(Self {
            participants,
            topic: topic.into(),
            environment: environment.into(),
            current_round: 0,
            total_rounds,
            log: ResultLog::new(),
            store,
            params: VotingParams::default(),
            state: SchedulerState::Idle,
            progress: Arc::new(NoProgress),
            transcript: Arc::new(NoTranscript),
        })
    }

    pub fn with_params(mut self, params: VotingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn RoundProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    // ==================== Accessors ====================

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// True once the configured number of full rounds has run
    pub fn budget_exhausted(&self) -> bool {
        self.current_round >= self.total_rounds
    }

    pub fn log(&self) -> &ResultLog {
        &self.log
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Participant at ordinal `index`
    pub fn participant_mut(&mut self, index: usize) -> Result<&mut Participant, DomainError> {
        let count = self.participants.len();
        self.participants
            .get_mut(index)
            .ok_or(DomainError::ParticipantOutOfRange { index, count })
    }

    // ==================== Flows ====================

    /// Run one full round on the current topic.
    pub async fn run_full_round(&mut self) -> Result<RoundRecord, RoundError> {
        self.state = SchedulerState::RunningFullRound;
        let result = self.full_round().await;
        self.state = SchedulerState::Idle;
        result
    }

    /// Add `proposal` to the latest round's slate and vote again.
    ///
    /// Fails without touching any state when no round has completed yet.
    pub async fn inject_proposal(&mut self, proposal: &str) -> Result<RoundRecord, RoundError> {
        let previous = self.log.latest().cloned().ok_or(DomainError::EmptyResultLog)?;
        self.state = SchedulerState::RunningInjection;
        let result = self.injection(previous, proposal).await;
        self.state = SchedulerState::Idle;
        result
    }

    async fn full_round(&mut self) -> Result<RoundRecord, RoundError> {
        let round = self.current_round;
        info!(
            "Starting round {} of {} on topic: {}",
            round + 1,
            self.total_rounds,
            self.topic
        );
        self.progress
            .on_round_start(round + 1, self.total_rounds, &self.topic);

        let topic = self.topic.clone();
        let proposals: Vec<String> = join_all(
            self.participants
                .iter_mut()
                .map(|participant| participant.propose(&topic)),
        )
        .await
        .into_iter()
        .collect::<Result<_, _>>()?;

        for (participant, proposal) in self.participants.iter().zip(&proposals) {
            self.progress.on_proposal(participant.profile(), proposal);
        }

        let resolution = resolve_vote(
            &mut self.participants,
            proposals.clone(),
            &self.params,
            self.progress.as_ref(),
            self.transcript.as_ref(),
        )
        .await?;

        let record = RoundRecord::new(
            RoundCount::full(round),
            topic,
            proposals,
            resolution.recorded_votes(self.participants.len()),
            resolution.winner,
        )?;
        self.commit(&record, "round_completed");
        self.current_round += 1;
        info!("Round {} completed", self.current_round);

        self.advance_topic(&record.winning_proposal).await?;
        Ok(record)
    }

    async fn injection(
        &mut self,
        previous: RoundRecord,
        proposal: &str,
    ) -> Result<RoundRecord, RoundError> {
        info!("Adding new proposal: {}", proposal);
        self.progress.on_injection_start(proposal);

        let slate = previous.extended_slate(proposal);
        let resolution = resolve_vote(
            &mut self.participants,
            slate.clone(),
            &self.params,
            self.progress.as_ref(),
            self.transcript.as_ref(),
        )
        .await?;

        let record = RoundRecord::new(
            previous.round_count.injection(),
            previous.topic,
            slate,
            resolution.recorded_votes(self.participants.len()),
            resolution.winner,
        )?;
        self.commit(&record, "injection_completed");

        self.advance_topic(&record.winning_proposal).await?;
        Ok(record)
    }

    /// Append `record`, persist the log and report it
    fn commit(&mut self, record: &RoundRecord, event_type: &'static str) {
        info!(
            "Winning proposal (round {}): {}",
            record.round_count, record.winning_proposal
        );
        self.log.append(record.clone());
        self.persist();
        self.progress.on_record(record);
        self.transcript.log(TranscriptEvent::new(
            event_type,
            serde_json::to_value(record).unwrap_or_default(),
        ));
    }

    fn persist(&self) {
        match self.store.save(&self.log) {
            Ok(()) => info!(
                "Results saved to {} ({} records)",
                self.store.location(),
                self.log.len()
            ),
            Err(e) => warn!(
                "Could not persist results to {}: {}; keeping them in memory",
                self.store.location(),
                e
            ),
        }
    }

    async fn advance_topic(&mut self, winning_proposal: &str) -> Result<(), RoundError> {
        let next = self.participants[0]
            .summarize_topic(winning_proposal, &self.environment)
            .await?;
        if next.is_empty() {
            warn!("Empty topic generated; keeping '{}'", self.topic);
            return Ok(());
        }
        info!("Next topic: {}", next);
        self.progress.on_topic_advanced(&next);
        self.transcript.log(TranscriptEvent::new(
            "topic_advanced",
            serde_json::json!({ "from": self.topic, "to": next }),
        ));
        self.topic = next;
        Ok(())
    }
}
