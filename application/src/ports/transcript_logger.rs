//! Port for structured transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording deliberation events
//! (proposals, votes, fallbacks, revotes, completed rounds, dropped commands)
//! to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! deliberation in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured transcript event for logging.
///
/// Each event has a type string and a JSON payload containing event-specific
/// fields. The adapter stamps the time.
#[derive(Debug, Clone)]
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "proposal", "vote", "round_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that a broken log file
/// never disturbs a round.
pub trait TranscriptLogger: Send + Sync {
    /// Record a transcript event.
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoTranscript;

impl TranscriptLogger for NoTranscript {
    fn log(&self, _event: TranscriptEvent) {}
}
