//! Round outcomes and their history.
//!
//! A full round produces a [`RoundRecord`] with an integer [`RoundCount`];
//! an injection into the latest round produces a new record counted
//! `n + 0.5`. Both are appended to the [`ResultLog`], never rewritten.

pub mod log;
pub mod record;

pub use log::ResultLog;
pub use record::{RoundCount, RoundRecord};
