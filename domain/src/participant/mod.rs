//! Participants seated at the round table.

pub mod profile;

pub use profile::{ParticipantId, ParticipantProfile};
