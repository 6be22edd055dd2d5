//! Execution parameters — round and processor loop control.
//!
//! [`VotingParams`] controls how participants vote and how ties are settled;
//! [`ProcessorParams`] controls the command loop. These are application-layer
//! concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Voting and recall parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingParams {
    /// Generation attempts per vote before falling back to a random choice.
    pub max_attempts: usize,
    /// Number of memories recalled into each prompt.
    pub recall_limit: usize,
    /// Extra passes allowed when a tie covers every remaining option
    /// before the winner is drawn at random from the tie. `None` keeps
    /// revoting until one option wins outright.
    pub max_stalled_revotes: Option<usize>,
}

impl Default for VotingParams {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            recall_limit: 5,
            max_stalled_revotes: None,
        }
    }
}

impl VotingParams {
    // ==================== Builder Methods ====================

    pub fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_recall_limit(mut self, limit: usize) -> Self {
        self.recall_limit = limit;
        self
    }

    pub fn with_max_stalled_revotes(mut self, max: Option<usize>) -> Self {
        self.max_stalled_revotes = max;
        self
    }
}

/// Command loop parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorParams {
    /// How long the processor waits on an empty queue before re-checking
    /// the round budget.
    pub poll_interval: Duration,
}

impl Default for ProcessorParams {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl ProcessorParams {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
