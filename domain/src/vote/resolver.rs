//! Plurality vote resolution with tie-breaking by restricted revote.
//!
//! A pass tallies one vote per participant. A unique plurality wins. A tie
//! narrows the slate to the tied options (order preserved, re-indexed
//! `1..=k`) and asks the caller for another pass over that reduced slate.
//! Casting votes needs the participants, so the revote itself is driven by
//! the application layer; [`VoteResolver`] only tracks the shrinking
//! candidate set.
//!
//! ```text
//! options [A, B, C]   votes [1, 2, 1, 2]   -> tie {A, B}
//! options [A, B]      votes [1, 1, 2, 1]   -> winner A
//! ```
//!
//! A tie that covers every remaining candidate cannot narrow the slate. It is
//! reported as [`ResolverStep::Stalled`] so the caller can decide whether to
//! vote again or force a choice with [`VoteResolver::break_tie`].

use crate::core::error::DomainError;
use std::collections::BTreeMap;

/// Result of tallying a single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tally {
    /// Exactly one option holds the highest count (1-based slate index).
    Unique(usize),
    /// Several options share the highest count (1-based, ascending).
    Tied(Vec<usize>),
}

/// Tally one pass of 1-based votes over a slate of `options` entries.
pub fn tally(votes: &[usize], options: usize) -> Result<Tally, DomainError> {
    if options == 0 {
        return Err(DomainError::EmptySlate);
    }
    if votes.is_empty() {
        return Err(DomainError::NoVotes);
    }

    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &vote in votes {
        if vote == 0 || vote > options {
            return Err(DomainError::VoteOutOfRange { vote, options });
        }
        *counts.entry(vote).or_default() += 1;
    }

    let max = counts.values().copied().max().unwrap_or_default();
    let plurality: Vec<usize> = counts
        .into_iter()
        .filter(|&(_, count)| count == max)
        .map(|(index, _)| index)
        .collect();

    match plurality.as_slice() {
        [single] => Ok(Tally::Unique(*single)),
        _ => Ok(Tally::Tied(plurality)),
    }
}

/// Outcome of a single resolution pass over a concrete slate.
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome<T> {
    /// Terminal: the winner (1-based) with the votes and options unchanged.
    Winner {
        index: usize,
        votes: Vec<usize>,
        options: Vec<T>,
    },
    /// A tie: the reduced slate to vote on next, and where each of its
    /// entries sat in the slate that was just tallied (1-based).
    Revote { options: Vec<T>, from: Vec<usize> },
}

/// Resolve one pass of `votes` over `options`.
pub fn resolve_pass<T: Clone>(options: &[T], votes: &[usize]) -> Result<PassOutcome<T>, DomainError> {
    match tally(votes, options.len())? {
        Tally::Unique(index) => Ok(PassOutcome::Winner {
            index,
            votes: votes.to_vec(),
            options: options.to_vec(),
        }),
        Tally::Tied(tied) => Ok(PassOutcome::Revote {
            options: tied.iter().map(|&i| options[i - 1].clone()).collect(),
            from: tied,
        }),
    }
}

/// The settled result of a (possibly multi-pass) resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    /// Winner as a 1-based index into the original options.
    pub winner: usize,
    /// Votes of the deciding pass, 1-based into `final_options`.
    /// Empty when the slate held a single option and no vote was needed.
    pub final_votes: Vec<usize>,
    /// The slate the deciding pass was cast over.
    pub final_options: Vec<T>,
    /// 1-based original index of each entry in `final_options`.
    pub final_candidates: Vec<usize>,
    /// Number of voting passes that were tallied.
    pub passes: usize,
    /// True when a stalled tie was settled by [`VoteResolver::break_tie`].
    pub forced: bool,
}

impl<T> Resolution<T> {
    /// Deciding-pass votes translated to 1-based indices into the original
    /// options.
    pub fn votes_in_original(&self) -> Vec<usize> {
        self.final_votes
            .iter()
            .map(|&vote| self.final_candidates[vote - 1])
            .collect()
    }

    /// Votes to record for `participants` voters.
    ///
    /// Without a deciding pass every voter is recorded as choosing the only
    /// option that remained.
    pub fn recorded_votes(&self, participants: usize) -> Vec<usize> {
        if self.final_votes.is_empty() {
            vec![self.winner; participants]
        } else {
            self.votes_in_original()
        }
    }
}

/// What the caller must do after submitting a pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverStep<T> {
    Decided(Resolution<T>),
    /// The slate was narrowed to the tied options; vote again over
    /// [`VoteResolver::slate`].
    Revote { tied: Vec<usize> },
    /// Every remaining option tied; the slate is unchanged.
    Stalled { tied: Vec<usize> },
}

/// Iterative narrowing over a shrinking candidate list.
#[derive(Debug, Clone)]
pub struct VoteResolver<T> {
    options: Vec<T>,
    /// 0-based indices into `options`, ascending.
    candidates: Vec<usize>,
    passes: usize,
    last_votes: Vec<usize>,
    /// Voter count fixed by the first pass; every revote must match it.
    voters: Option<usize>,
}

impl<T: Clone> VoteResolver<T> {
    pub fn new(options: Vec<T>) -> Result<Self, DomainError> {
        if options.is_empty() {
            return Err(DomainError::EmptySlate);
        }
        let candidates = (0..options.len()).collect();
        Ok(Self {
            options,
            candidates,
            passes: 0,
            last_votes: Vec::new(),
            voters: None,
        })
    }

    /// Options still in contention, in original order.
    pub fn slate(&self) -> Vec<T> {
        self.candidates
            .iter()
            .map(|&i| self.options[i].clone())
            .collect()
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Settle without voting when a single candidate remains.
    pub fn short_circuit(&self) -> Option<Resolution<T>> {
        match self.candidates.as_slice() {
            [only] => Some(self.resolution(*only, Vec::new(), false)),
            _ => None,
        }
    }

    /// Submit one vote per participant, 1-based into the current slate.
    pub fn submit(&mut self, votes: &[usize]) -> Result<ResolverStep<T>, DomainError> {
        if let Some(expected) = self.voters
            && votes.len() != expected
        {
            return Err(DomainError::VoteCountMismatch {
                expected,
                actual: votes.len(),
            });
        }

        let outcome = resolve_pass(&self.candidates, votes)?;
        self.passes += 1;
        self.voters = Some(votes.len());
        self.last_votes = votes.to_vec();

        match outcome {
            PassOutcome::Winner { index, votes, .. } => {
                let winner = self.candidates[index - 1];
                Ok(ResolverStep::Decided(self.resolution(winner, votes, false)))
            }
            PassOutcome::Revote { options, from } if options.len() < self.candidates.len() => {
                self.candidates = options;
                Ok(ResolverStep::Revote { tied: from })
            }
            PassOutcome::Revote { from, .. } => Ok(ResolverStep::Stalled { tied: from }),
        }
    }

    /// Force a winner among the current slate (1-based), keeping the votes of
    /// the last pass as the deciding votes.
    pub fn break_tie(&self, pick: usize) -> Result<Resolution<T>, DomainError> {
        if pick == 0 || pick > self.candidates.len() {
            return Err(DomainError::VoteOutOfRange {
                vote: pick,
                options: self.candidates.len(),
            });
        }
        Ok(self.resolution(self.candidates[pick - 1], self.last_votes.clone(), true))
    }

    fn resolution(&self, winner: usize, final_votes: Vec<usize>, forced: bool) -> Resolution<T> {
        Resolution {
            winner: winner + 1,
            final_votes,
            final_options: self.slate(),
            final_candidates: self.candidates.iter().map(|&i| i + 1).collect(),
            passes: self.passes,
            forced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<&'static str> {
        vec!["A", "B", "C"]
    }

    #[test]
    fn test_unique_plurality_wins_with_options_unchanged() {
        let outcome = resolve_pass(&abc(), &[1, 1, 2]).unwrap();
        assert_eq!(
            outcome,
            PassOutcome::Winner {
                index: 1,
                votes: vec![1, 1, 2],
                options: abc(),
            }
        );
    }

    #[test]
    fn test_unanimous_vote_terminates_in_one_pass() {
        let mut resolver = VoteResolver::new(abc()).unwrap();
        let step = resolver.submit(&[3, 3, 3]).unwrap();
        let ResolverStep::Decided(resolution) = step else {
            panic!("expected a decision, got {step:?}");
        };
        assert_eq!(resolution.winner, 3);
        assert_eq!(resolution.passes, 1);
        assert!(!resolution.forced);
    }

    #[test]
    fn test_tie_reduces_to_tied_subset() {
        let outcome = resolve_pass(&abc(), &[1, 2, 1, 2]).unwrap();
        assert_eq!(
            outcome,
            PassOutcome::Revote {
                options: vec!["A", "B"],
                from: vec![1, 2],
            }
        );
    }

    #[test]
    fn test_restricted_revote_never_presents_excluded_option() {
        let mut resolver = VoteResolver::new(abc()).unwrap();

        let step = resolver.submit(&[1, 2, 1, 2]).unwrap();
        assert_eq!(step, ResolverStep::Revote { tied: vec![1, 2] });
        assert_eq!(resolver.slate(), vec!["A", "B"]);
        assert!(!resolver.slate().contains(&"C"));

        let step = resolver.submit(&[1, 1, 2, 1]).unwrap();
        let ResolverStep::Decided(resolution) = step else {
            panic!("expected a decision, got {step:?}");
        };
        assert_eq!(resolution.winner, 1);
        assert_eq!(resolution.final_options, vec!["A", "B"]);
        assert_eq!(resolution.passes, 2);
    }

    #[test]
    fn test_tie_between_later_options_maps_back_to_original_indices() {
        let mut resolver = VoteResolver::new(vec!["A", "B", "C", "D"]).unwrap();
        resolver.submit(&[2, 4, 4, 2, 1]).unwrap();
        assert_eq!(resolver.slate(), vec!["B", "D"]);

        let ResolverStep::Decided(resolution) = resolver.submit(&[2, 2, 1, 2, 2]).unwrap() else {
            panic!("expected a decision");
        };
        assert_eq!(resolution.winner, 4);
        assert_eq!(resolution.final_candidates, vec![2, 4]);
        assert_eq!(resolution.votes_in_original(), vec![4, 4, 2, 4, 4]);
    }

    #[test]
    fn test_candidate_set_strictly_shrinks_on_every_revote() {
        let mut resolver = VoteResolver::new(vec!["A", "B", "C", "D", "E"]).unwrap();
        let passes: [&[usize]; 2] = [&[1, 2, 3, 1, 2, 3], &[1, 1, 1, 2, 2, 2]];

        let mut previous = resolver.candidate_count();
        for votes in passes {
            match resolver.submit(votes).unwrap() {
                ResolverStep::Revote { .. } => {
                    assert!(resolver.candidate_count() < previous);
                    previous = resolver.candidate_count();
                }
                other => panic!("expected a revote, got {other:?}"),
            }
        }
        assert_eq!(resolver.slate(), vec!["A", "B"]);

        // An even split over the last two cannot narrow any further.
        let step = resolver.submit(&[1, 2, 1, 2, 1, 2]).unwrap();
        assert!(matches!(step, ResolverStep::Stalled { .. }));
        assert_eq!(resolver.candidate_count(), 2);
    }

    #[test]
    fn test_full_tie_stalls_without_changing_slate() {
        let mut resolver = VoteResolver::new(vec!["A", "B"]).unwrap();
        let step = resolver.submit(&[1, 2]).unwrap();
        assert_eq!(step, ResolverStep::Stalled { tied: vec![1, 2] });
        assert_eq!(resolver.slate(), vec!["A", "B"]);

        let forced = resolver.break_tie(2).unwrap();
        assert_eq!(forced.winner, 2);
        assert!(forced.forced);
        assert_eq!(forced.final_votes, vec![1, 2]);
    }

    #[test]
    fn test_single_option_short_circuits() {
        let resolver = VoteResolver::new(vec!["only"]).unwrap();
        let resolution = resolver.short_circuit().unwrap();
        assert_eq!(resolution.winner, 1);
        assert_eq!(resolution.passes, 0);
        assert!(resolution.final_votes.is_empty());
        assert_eq!(resolution.recorded_votes(3), vec![1, 1, 1]);

        let contested = VoteResolver::new(abc()).unwrap();
        assert!(contested.short_circuit().is_none());
    }

    #[test]
    fn test_rejects_invalid_votes() {
        let mut resolver = VoteResolver::new(abc()).unwrap();
        assert_eq!(
            resolver.submit(&[1, 4]).unwrap_err(),
            DomainError::VoteOutOfRange { vote: 4, options: 3 }
        );
        assert_eq!(resolver.submit(&[]).unwrap_err(), DomainError::NoVotes);
        assert_eq!(resolver.passes(), 0);
        assert!(VoteResolver::<&str>::new(vec![]).is_err());
    }

    #[test]
    fn test_revote_must_keep_the_same_voters() {
        let mut resolver = VoteResolver::new(abc()).unwrap();
        resolver.submit(&[1, 2, 1, 2]).unwrap();
        assert_eq!(
            resolver.submit(&[1, 1, 2]).unwrap_err(),
            DomainError::VoteCountMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(resolver.passes(), 1);
        assert_eq!(resolver.slate(), vec!["A", "B"]);
    }

    #[test]
    fn test_resolver_narrows_exactly_like_a_single_pass() {
        let votes = [2, 4, 4, 2, 1];
        let options = vec!["A", "B", "C", "D"];
        let PassOutcome::Revote { options: reduced, from } = resolve_pass(&options, &votes).unwrap()
        else {
            panic!("expected a tie");
        };

        let mut resolver = VoteResolver::new(options).unwrap();
        assert_eq!(
            resolver.submit(&votes).unwrap(),
            ResolverStep::Revote { tied: from }
        );
        assert_eq!(resolver.slate(), reduced);
    }

    #[test]
    fn test_votes_out_of_reduced_range_are_rejected() {
        let mut resolver = VoteResolver::new(abc()).unwrap();
        resolver.submit(&[1, 2, 1, 2]).unwrap();
        assert_eq!(
            resolver.submit(&[3, 1, 1, 1]).unwrap_err(),
            DomainError::VoteOutOfRange { vote: 3, options: 2 }
        );
    }
}
