//! Progress notification port
//!
//! Defines the interface for reporting progress while rounds run.

use roundtable_domain::{Activity, Command, ParticipantProfile, RoundRecord};

/// Callback for progress updates during round execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, log file, etc.)
pub trait RoundProgressNotifier: Send + Sync {
    /// Called when a full round starts (`round` is 1-based for display)
    fn on_round_start(&self, round: u32, total_rounds: u32, topic: &str);

    /// Called when an injected proposal is about to be voted on
    fn on_injection_start(&self, proposal: &str);

    /// Called for every proposal, in participant order
    fn on_proposal(&self, participant: &ParticipantProfile, proposal: &str);

    /// Called after each voting pass
    fn on_votes(&self, pass: usize, options: &[String], votes: &[usize]);

    /// Called when a tie sends the participants back to vote
    fn on_revote(&self, _tied: &[String]) {}

    /// Called when a record has been appended to the result log
    fn on_record(&self, record: &RoundRecord);

    /// Called when the topic for the next round has been chosen
    fn on_topic_advanced(&self, _topic: &str) {}

    /// Called when the processor changes activity
    fn on_activity(&self, _activity: Activity) {}

    /// Called when a command could not be applied
    fn on_command_failed(&self, _command: &Command, _reason: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RoundProgressNotifier for NoProgress {
    fn on_round_start(&self, _round: u32, _total_rounds: u32, _topic: &str) {}
    fn on_injection_start(&self, _proposal: &str) {}
    fn on_proposal(&self, _participant: &ParticipantProfile, _proposal: &str) {}
    fn on_votes(&self, _pass: usize, _options: &[String], _votes: &[usize]) {}
    fn on_record(&self, _record: &RoundRecord) {}
}
