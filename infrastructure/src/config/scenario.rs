//! Scenario file: the participant roster and the starting point of the
//! deliberation.
//!
//! ```json
//! {
//!   "agents": [
//!     { "name": "Ada", "age": 34, "traits": "urban planner", "status": "optimistic",
//!       "initial_memory": ["I grew up by the river"] }
//!   ],
//!   "environment": "A river city of two million people",
//!   "original_topic": "How should the city grow?",
//!   "total_round": 3
//! }
//! ```

use roundtable_domain::ParticipantProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that stop startup before any round runs
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Could not read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scenario {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Scenario has no agents")]
    NoAgents,

    #[error("Agent #{index} has an empty name")]
    UnnamedAgent { index: usize },
}

/// One roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioAgent {
    pub name: String,
    pub age: u32,
    pub traits: String,
    pub status: String,
    #[serde(default)]
    pub initial_memory: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub agents: Vec<ScenarioAgent>,
    pub environment: String,
    pub original_topic: String,
    pub total_round: u32,
}

impl ScenarioConfig {
    /// Read and validate a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario: Self =
            serde_json::from_str(&content).map_err(|source| ScenarioError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.agents.is_empty() {
            return Err(ScenarioError::NoAgents);
        }
        if let Some(index) = self.agents.iter().position(|a| a.name.trim().is_empty()) {
            return Err(ScenarioError::UnnamedAgent { index });
        }
        Ok(())
    }

    /// Profiles in roster order, each sharing the scenario environment
    pub fn profiles(&self) -> Vec<ParticipantProfile> {
        self.agents
            .iter()
            .enumerate()
            .map(|(i, agent)| {
                ParticipantProfile::new(
                    i,
                    &agent.name,
                    agent.age,
                    &agent.traits,
                    &agent.status,
                    &self.environment,
                )
            })
            .collect()
    }
}
