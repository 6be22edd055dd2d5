//! Voting configuration from TOML (`[voting]` section)

use roundtable_application::VotingParams;
use serde::{Deserialize, Serialize};

/// Raw voting configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    /// Generation attempts per vote before the random fallback
    pub max_attempts: usize,
    /// Memories recalled into each prompt
    pub recall_limit: usize,
    /// Passes allowed on a tie covering every option before a random draw.
    /// Unset means revote until one option wins outright.
    pub max_stalled_revotes: Option<usize>,
}

impl Default for FileVotingConfig {
    fn default() -> Self {
        let params = VotingParams::default();
        Self {
            max_attempts: params.max_attempts,
            recall_limit: params.recall_limit,
            max_stalled_revotes: params.max_stalled_revotes,
        }
    }
}

impl FileVotingConfig {
    pub fn to_params(&self) -> VotingParams {
        VotingParams::default()
            .with_max_attempts(self.max_attempts)
            .with_recall_limit(self.recall_limit)
            .with_max_stalled_revotes(self.max_stalled_revotes)
    }
}
