//! Voting domain
//!
//! - [`resolver`] — plurality tally and tie-breaking by restricted revote
//! - [`parsing`] — turning a free-text answer into a 1-based choice

pub mod parsing;
pub mod resolver;

pub use parsing::{VoteParseError, parse_vote_choice};
pub use resolver::{PassOutcome, Resolution, ResolverStep, Tally, VoteResolver, resolve_pass, tally};
