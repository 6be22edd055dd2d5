//! Participant identity and persona.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal position of a participant at the table (0-based).
///
/// The ordinal fixes the order of proposals in the initial slate and the
/// order in which votes are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub usize);

impl ParticipantId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable persona of one participant.
///
/// Created once at startup from the scenario roster and never changed
/// afterwards; only the participant's memory grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub id: ParticipantId,
    pub name: String,
    pub age: u32,
    /// Free-form trait description, e.g. "urban planner who loves trains".
    pub traits: String,
    pub status: String,
    /// Description of the world shared by every participant.
    pub environment: String,
}

impl ParticipantProfile {
    pub fn new(
        id: usize,
        name: impl Into<String>,
        age: u32,
        traits: impl Into<String>,
        status: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            id: ParticipantId(id),
            name: name.into(),
            age,
            traits: traits.into(),
            status: status.into(),
            environment: environment.into(),
        }
    }

    /// One-sentence persona used at the head of every prompt.
    pub fn persona(&self) -> String {
        format!(
            "You are {}, a {}-year-old {}. Your current status is: {}. You live in this environment: {}.",
            self.name, self.age, self.traits, self.status, self.environment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_mentions_every_attribute() {
        let profile = ParticipantProfile::new(
            0,
            "Ada",
            34,
            "civil engineer",
            "designing bridges",
            "a coastal megacity",
        );
        let persona = profile.persona();
        assert!(persona.starts_with("You are Ada, a 34-year-old civil engineer."));
        assert!(persona.contains("designing bridges"));
        assert!(persona.contains("a coastal megacity"));
    }

    #[test]
    fn test_participant_id_display() {
        assert_eq!(ParticipantId(2).to_string(), "#2");
        assert_eq!(ParticipantId(2).index(), 2);
    }
}
