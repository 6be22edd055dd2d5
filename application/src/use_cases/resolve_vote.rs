//! Resolve Vote use case
//!
//! Drives [`VoteResolver`] with real participants: every participant votes
//! on the current slate, the resolver tallies, and ties send everybody back
//! to vote on the tied options only. Votes are gathered concurrently and
//! reassembled in participant order.

use crate::config::VotingParams;
use crate::participant::{Participant, ParticipantError, random_choice};
use crate::ports::progress::RoundProgressNotifier;
use crate::ports::transcript_logger::{TranscriptEvent, TranscriptLogger};
use crate::use_cases::round_scheduler::RoundError;
use futures::future::join_all;
use roundtable_domain::{DomainError, Resolution, ResolverStep, VoteResolver};
use tracing::{debug, info, warn};

/// Cast one vote per participant over `slate`, in participant order.
pub async fn cast_votes(
    participants: &mut [Participant],
    slate: &[String],
    max_attempts: usize,
) -> Result<Vec<usize>, ParticipantError> {
    let casts = join_all(
        participants
            .iter_mut()
            .map(|participant| participant.vote(slate, max_attempts)),
    )
    .await;

    casts
        .into_iter()
        .map(|cast| cast.map(|vote| vote.choice))
        .collect()
}

/// Resolve a winner among `options`, revoting over tied subsets as needed.
pub async fn resolve_vote(
    participants: &mut [Participant],
    options: Vec<String>,
    params: &VotingParams,
    progress: &dyn RoundProgressNotifier,
    transcript: &dyn TranscriptLogger,
) -> Result<Resolution<String>, RoundError> {
    if participants.is_empty() {
        return Err(DomainError::NoParticipants.into());
    }

    let mut resolver = VoteResolver::new(options)?;
    let mut stalled = 0usize;

    loop {
        if let Some(resolution) = resolver.short_circuit() {
            debug!("Single option left; no vote needed");
            return Ok(resolution);
        }

        let slate = resolver.slate();
        let votes = cast_votes(participants, &slate, params.max_attempts).await?;
        progress.on_votes(resolver.passes() + 1, &slate, &votes);
        info!("Votes: {:?}", votes);

        let before = resolver.candidate_count();
        match resolver.submit(&votes)? {
            ResolverStep::Decided(resolution) => return Ok(resolution),
            ResolverStep::Revote { tied } => {
                debug_assert!(resolver.candidate_count() < before);
                let tied_options = resolver.slate();
                info!(
                    "Tie between {:?}; revoting over {} options",
                    tied,
                    tied_options.len()
                );
                progress.on_revote(&tied_options);
                transcript.log(TranscriptEvent::new(
                    "revote",
                    serde_json::json!({ "votes": votes, "tied": tied_options }),
                ));
                stalled = 0;
            }
            ResolverStep::Stalled { tied } => {
                stalled += 1;
                if let Some(cap) = params.max_stalled_revotes
                    && stalled > cap
                {
                    let pick = random_choice(resolver.candidate_count());
                    warn!(
                        "Tie over {:?} persisted for {} passes; drawing option {} at random",
                        tied, stalled, pick
                    );
                    return Ok(resolver.break_tie(pick)?);
                }
                info!(
                    "Every remaining option tied ({:?}); voting again (stalled {} times)",
                    tied, stalled
                );
                progress.on_revote(&slate);
                transcript.log(TranscriptEvent::new(
                    "revote",
                    serde_json::json!({ "votes": votes, "tied": slate, "stalled": stalled }),
                ));
            }
        }
    }
}
