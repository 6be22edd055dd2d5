//! Round records: the immutable outcome of one full round or one injection.

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a round record.
///
/// Full rounds carry an integer count; an injection into round `n` is
/// recorded as `n + 0.5`. Serialized as a plain JSON number (`3`, `3.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundCount {
    round: u32,
    injection: bool,
}

impl RoundCount {
    /// Count of a full round.
    pub const fn full(round: u32) -> Self {
        Self {
            round,
            injection: false,
        }
    }

    /// Count of an injection derived from this record.
    ///
    /// Repeated injections into the same round all share `round + 0.5`, so an
    /// injection count never collides with the next full round.
    pub const fn injection(self) -> Self {
        Self {
            round: self.round,
            injection: true,
        }
    }

    pub const fn round(self) -> u32 {
        self.round
    }

    pub const fn is_injection(self) -> bool {
        self.injection
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.round) + if self.injection { 0.5 } else { 0.0 }
    }
}

impl fmt::Display for RoundCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.injection {
            write!(f, "{}.5", self.round)
        } else {
            write!(f, "{}", self.round)
        }
    }
}

impl TryFrom<f64> for RoundCount {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
            return Err(format!("invalid round count {value}"));
        }
        let round = value.trunc();
        let fraction = value - round;
        let injection = if fraction == 0.0 {
            false
        } else if fraction == 0.5 {
            true
        } else {
            return Err(format!("round count {value} is neither whole nor .5"));
        };
        Ok(Self {
            round: round as u32,
            injection,
        })
    }
}

impl Serialize for RoundCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.injection {
            serializer.serialize_f64(self.as_f64())
        } else {
            serializer.serialize_u32(self.round)
        }
    }
}

impl<'de> Deserialize<'de> for RoundCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        RoundCount::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// The finalized outcome of a full round or of an injection.
///
/// `votes[i]` is the 1-based choice of participant `i` and always indexes
/// into `proposals`. Records are never mutated once built; an injection
/// produces a new record instead of rewriting its predecessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_count: RoundCount,
    pub topic: String,
    pub proposals: Vec<String>,
    pub votes: Vec<usize>,
    pub winning_proposal: String,
}

impl RoundRecord {
    /// Build a record, checking that every vote and the winner index into
    /// `proposals` (all 1-based).
    pub fn new(
        round_count: RoundCount,
        topic: impl Into<String>,
        proposals: Vec<String>,
        votes: Vec<usize>,
        winner: usize,
    ) -> Result<Self, DomainError> {
        let options = proposals.len();
        for &vote in votes.iter().chain(std::iter::once(&winner)) {
            if vote == 0 || vote > options {
                return Err(DomainError::VoteOutOfRange { vote, options });
            }
        }
        let winning_proposal = proposals[winner - 1].clone();
        Ok(Self {
            round_count,
            topic: topic.into(),
            proposals,
            votes,
            winning_proposal,
        })
    }

    /// The slate for an injection: this record's proposals plus `injected`.
    pub fn extended_slate(&self, injected: impl Into<String>) -> Vec<String> {
        let mut slate = self.proposals.clone();
        slate.push(injected.into());
        slate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposals() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[test]
    fn test_round_count_serializes_as_number() {
        assert_eq!(serde_json::to_string(&RoundCount::full(2)).unwrap(), "2");
        assert_eq!(
            serde_json::to_string(&RoundCount::full(2).injection()).unwrap(),
            "2.5"
        );
    }

    #[test]
    fn test_round_count_deserializes_whole_and_half() {
        let full: RoundCount = serde_json::from_str("4").unwrap();
        assert_eq!(full, RoundCount::full(4));
        let injected: RoundCount = serde_json::from_str("4.5").unwrap();
        assert_eq!(injected, RoundCount::full(4).injection());
        assert!(serde_json::from_str::<RoundCount>("4.25").is_err());
        assert!(serde_json::from_str::<RoundCount>("-1").is_err());
    }

    #[test]
    fn test_injection_of_injection_stays_on_same_round() {
        let first = RoundCount::full(1).injection();
        assert_eq!(first.injection(), first);
        assert_eq!(first.as_f64(), 1.5);
        assert_eq!(first.to_string(), "1.5");
    }

    #[test]
    fn test_record_picks_winning_text() {
        let record =
            RoundRecord::new(RoundCount::full(0), "cities", proposals(), vec![1, 1, 2], 1).unwrap();
        assert_eq!(record.winning_proposal, "A");
        assert_eq!(record.votes, vec![1, 1, 2]);
    }

    #[test]
    fn test_record_rejects_out_of_range_votes() {
        let err = RoundRecord::new(RoundCount::full(0), "t", proposals(), vec![1, 4], 1)
            .unwrap_err();
        assert_eq!(err, DomainError::VoteOutOfRange { vote: 4, options: 3 });

        let err = RoundRecord::new(RoundCount::full(0), "t", proposals(), vec![0], 1).unwrap_err();
        assert_eq!(err, DomainError::VoteOutOfRange { vote: 0, options: 3 });
    }

    #[test]
    fn test_extended_slate_leaves_record_untouched() {
        let record =
            RoundRecord::new(RoundCount::full(0), "t", proposals(), vec![2, 2, 2], 2).unwrap();
        let slate = record.extended_slate("D");
        assert_eq!(slate, vec!["A", "B", "C", "D"]);
        assert_eq!(record.proposals.len(), 3);
    }

    #[test]
    fn test_record_wire_shape() {
        let record =
            RoundRecord::new(RoundCount::full(0).injection(), "t", proposals(), vec![3], 3)
                .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["round_count"], 0.5);
        assert_eq!(json["topic"], "t");
        assert_eq!(json["votes"], serde_json::json!([3]));
        assert_eq!(json["winning_proposal"], "C");
    }
}
