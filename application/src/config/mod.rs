//! Application-level configuration.
//!
//! - [`VotingParams`] — vote retries, memory recall, stalled-tie handling
//! - [`ProcessorParams`] — command loop polling

pub mod execution_params;

pub use execution_params::{ProcessorParams, VotingParams};
