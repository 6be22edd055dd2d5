//! Command Processor
//!
//! The single consumer of the command queue. Waits for commands with a
//! bounded poll, then dispatches every queued command in FIFO order before
//! waiting again. Exactly one command runs at a time, so the scheduler is
//! never entered re-entrantly.
//!
//! A failing command never stops the loop: commands that do not apply to the
//! current state are dropped, and generation or memory failures abort only
//! the command that hit them.

use crate::config::ProcessorParams;
use crate::ports::progress::{NoProgress, RoundProgressNotifier};
use crate::ports::transcript_logger::{NoTranscript, TranscriptEvent, TranscriptLogger};
use crate::queue::{CommandReceiver, WaitOutcome};
use crate::use_cases::round_scheduler::{RoundError, RoundScheduler};
use roundtable_domain::{Activity, Command, ResultLog};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Summary of a processor run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessorReport {
    pub log: ResultLog,
    pub final_topic: String,
    pub rounds_completed: u32,
    pub dispatched: usize,
    pub dropped: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone, Copy)]
struct DispatchStats {
    dispatched: usize,
    dropped: usize,
    failed: usize,
}

pub struct CommandProcessor {
    scheduler: RoundScheduler,
    queue: CommandReceiver,
    params: ProcessorParams,
    activity: watch::Sender<Activity>,
    progress: Arc<dyn RoundProgressNotifier>,
    transcript: Arc<dyn TranscriptLogger>,
    stats: DispatchStats,
}

impl CommandProcessor {
    pub fn new(scheduler: RoundScheduler, queue: CommandReceiver) -> Self {
        let (activity, _) = watch::channel(Activity::Idle);
        Self {
            scheduler,
            queue,
            params: ProcessorParams::default(),
            activity,
            progress: Arc::new(NoProgress),
            transcript: Arc::new(NoTranscript),
            stats: DispatchStats::default(),
        }
    }

    pub fn with_params(mut self, params: ProcessorParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn RoundProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    /// Subscribe to the current-activity indicator
    pub fn activity(&self) -> watch::Receiver<Activity> {
        self.activity.subscribe()
    }

    pub fn scheduler(&self) -> &RoundScheduler {
        &self.scheduler
    }

    /// Consume commands until the round budget is exhausted or every
    /// producer is gone and the queue is empty.
    pub async fn run(&mut self) -> ProcessorReport {
        info!(
            "Command processor started ({} rounds budgeted)",
            self.scheduler.total_rounds()
        );

        while !self.scheduler.budget_exhausted() {
            match self.queue.next_batch(self.params.poll_interval).await {
                WaitOutcome::Ready(batch) => {
                    debug!("Dispatching {} queued command(s)", batch.len());
                    for command in batch {
                        self.dispatch(command).await;
                    }
                }
                WaitOutcome::Idle => continue,
                WaitOutcome::Closed => {
                    info!("Command queue closed; stopping");
                    break;
                }
            }
        }

        if self.scheduler.budget_exhausted() {
            info!(
                "Round budget exhausted after {} rounds",
                self.scheduler.current_round()
            );
        }
        self.report()
    }

    /// Apply one command. Failures are logged and counted, never returned.
    pub async fn dispatch(&mut self, command: Command) {
        self.stats.dispatched += 1;
        self.set_activity(command.activity());
        info!("Processing command: {}", command);

        let result = match &command {
            Command::StartRound => self.scheduler.run_full_round().await.map(|_| ()),
            Command::InjectProposal(text) => {
                self.scheduler.inject_proposal(text).await.map(|_| ())
            }
            Command::AppendMemory { participant, text } => {
                self.append_memory(*participant, text).await
            }
        };

        if let Err(e) = result {
            self.record_failure(&command, &e);
        }
        self.set_activity(Activity::Idle);
    }

    async fn append_memory(&mut self, index: usize, text: &str) -> Result<(), RoundError> {
        let participant = self.scheduler.participant_mut(index)?;
        participant.add_memory(text).await?;
        info!("Memory added to {}: {}", participant.name(), text);
        self.transcript.log(TranscriptEvent::new(
            "memory_added",
            serde_json::json!({
                "participant": participant.name(),
                "index": index,
                "memory": text,
            }),
        ));
        Ok(())
    }

    fn record_failure(&mut self, command: &Command, e: &RoundError) {
        let reason = e.to_string();
        if e.is_invalid_command_state() {
            self.stats.dropped += 1;
            warn!("Dropping '{}' command: {}", command.kind(), reason);
            self.transcript.log(TranscriptEvent::new(
                "command_dropped",
                serde_json::json!({ "command": command.kind(), "reason": reason }),
            ));
        } else {
            self.stats.failed += 1;
            error!("'{}' command failed: {}", command.kind(), reason);
        }
        self.progress.on_command_failed(command, &reason);
    }

    fn set_activity(&self, activity: Activity) {
        self.activity.send_replace(activity);
        self.progress.on_activity(activity);
    }

    fn report(&self) -> ProcessorReport {
        ProcessorReport {
            log: self.scheduler.log().clone(),
            final_topic: self.scheduler.topic().to_string(),
            rounds_completed: self.scheduler.current_round(),
            dispatched: self.stats.dispatched,
            dropped: self.stats.dropped,
            failed: self.stats.failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Participant;
    use crate::queue::command_queue;
    use crate::testing::{
        MemoryResultStore, RecordingMemory, RecordingTranscript, ScriptedGenerator, profile,
    };
    use roundtable_domain::RoundCount;
    use std::sync::Mutex;
    use std::time::Duration;

    struct Table {
        scheduler: RoundScheduler,
        memories: Vec<RecordingMemory>,
    }

    fn table(total_rounds: u32) -> Table {
        let memories: Vec<RecordingMemory> = (0..3).map(|_| RecordingMemory::new()).collect();
        let participants = memories
            .iter()
            .enumerate()
            .map(|(i, memory)| {
                Participant::new(
                    profile(i, &format!("P{i}")),
                    Arc::new(ScriptedGenerator::new().proposals([["Trams", "Bikes", "Ferries"][i]])),
                    Box::new(memory.clone()),
                )
            })
            .collect();
        let scheduler = RoundScheduler::new(
            participants,
            "future cities",
            "a river city",
            total_rounds,
            Arc::new(MemoryResultStore::new()),
        )
        .unwrap();
        Table {
            scheduler,
            memories,
        }
    }

    fn fast() -> ProcessorParams {
        ProcessorParams::default().with_poll_interval(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_commands_apply_in_enqueue_order() {
        let Table { scheduler, memories } = table(3);
        let (tx, rx) = command_queue();
        tx.push(Command::StartRound).unwrap();
        tx.push(Command::InjectProposal("X".into())).unwrap();
        tx.push(Command::AppendMemory {
            participant: 0,
            text: "met the mayor".into(),
        })
        .unwrap();
        drop(tx);

        let report = CommandProcessor::new(scheduler, rx)
            .with_params(fast())
            .run()
            .await;

        let records = report.log.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].round_count, RoundCount::full(0));
        assert_eq!(records[1].round_count, RoundCount::full(0).injection());
        assert_eq!(records[1].proposals.last().map(String::as_str), Some("X"));
        assert_eq!(memories[0].entries().last().map(String::as_str), Some("met the mayor"));
        assert_eq!(report.dispatched, 3);
        assert_eq!(report.dropped, 0);
        assert_eq!(report.rounds_completed, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_memory_is_dropped() {
        let Table { scheduler, memories } = table(1);
        let transcript = Arc::new(RecordingTranscript::default());
        let (tx, rx) = command_queue();
        tx.push(Command::AppendMemory {
            participant: 7,
            text: "lost".into(),
        })
        .unwrap();
        drop(tx);

        let report = CommandProcessor::new(scheduler, rx)
            .with_params(fast())
            .with_transcript(Arc::clone(&transcript) as Arc<dyn TranscriptLogger>)
            .run()
            .await;

        assert_eq!(report.dropped, 1);
        assert!(memories.iter().all(|m| m.entries().is_empty()));
        assert_eq!(transcript.event_types(), vec!["command_dropped"]);
    }

    #[tokio::test]
    async fn test_injection_before_any_round_is_dropped() {
        let Table { scheduler, .. } = table(1);
        let (tx, rx) = command_queue();
        tx.push(Command::InjectProposal("early".into())).unwrap();
        tx.push(Command::StartRound).unwrap();

        let report = CommandProcessor::new(scheduler, rx)
            .with_params(fast())
            .run()
            .await;

        assert_eq!(report.dropped, 1);
        assert_eq!(report.log.len(), 1);
        assert!(!report.log.records()[0].round_count.is_injection());
    }

    #[tokio::test]
    async fn test_stops_at_round_budget_with_live_producer() {
        let Table { scheduler, .. } = table(1);
        let (tx, rx) = command_queue();
        tx.push(Command::StartRound).unwrap();

        let report = CommandProcessor::new(scheduler, rx)
            .with_params(fast())
            .run()
            .await;

        assert_eq!(report.rounds_completed, 1);
        assert_eq!(report.log.len(), 1);
        drop(tx);
    }

    #[tokio::test]
    async fn test_closed_empty_queue_ends_run() {
        let Table { scheduler, .. } = table(5);
        let (tx, rx) = command_queue();
        drop(tx);

        let report = CommandProcessor::new(scheduler, rx)
            .with_params(fast())
            .run()
            .await;

        assert_eq!(report.dispatched, 0);
        assert!(report.log.is_empty());
        assert_eq!(report.final_topic, "future cities");
    }

    #[tokio::test]
    async fn test_concurrent_producer_commands_all_dispatched() {
        let Table { scheduler, .. } = table(2);
        let (tx, rx) = command_queue();
        let producer = tokio::spawn(async move {
            tx.push(Command::StartRound).unwrap();
            tokio::time::sleep(Duration::from_millis(20)).await;
            tx.push(Command::InjectProposal("late idea".into())).unwrap();
            tx.push(Command::StartRound).unwrap();
        });

        let report = CommandProcessor::new(scheduler, rx)
            .with_params(fast())
            .run()
            .await;
        producer.await.unwrap();

        let counts: Vec<f64> = report
            .log
            .records()
            .iter()
            .map(|r| r.round_count.as_f64())
            .collect();
        assert_eq!(counts, vec![0.0, 0.5, 1.0]);
        assert_eq!(report.rounds_completed, 2);
    }

    /// Records every activity change
    #[derive(Default)]
    struct ActivityRecorder {
        seen: Mutex<Vec<Activity>>,
    }

    impl RoundProgressNotifier for ActivityRecorder {
        fn on_round_start(&self, _: u32, _: u32, _: &str) {}
        fn on_injection_start(&self, _: &str) {}
        fn on_proposal(&self, _: &roundtable_domain::ParticipantProfile, _: &str) {}
        fn on_votes(&self, _: usize, _: &[String], _: &[usize]) {}
        fn on_record(&self, _: &roundtable_domain::RoundRecord) {}
        fn on_activity(&self, activity: Activity) {
            self.seen.lock().unwrap().push(activity);
        }
    }

    #[tokio::test]
    async fn test_activity_tracks_dispatch() {
        let Table { scheduler, .. } = table(1);
        let recorder = Arc::new(ActivityRecorder::default());
        let (tx, rx) = command_queue();
        tx.push(Command::AppendMemory {
            participant: 1,
            text: "note".into(),
        })
        .unwrap();
        tx.push(Command::StartRound).unwrap();

        let mut processor = CommandProcessor::new(scheduler, rx)
            .with_params(fast())
            .with_progress(Arc::clone(&recorder) as Arc<dyn RoundProgressNotifier>);
        let activity = processor.activity();
        processor.run().await;

        assert_eq!(*activity.borrow(), Activity::Idle);
        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec![
                Activity::AppendingMemory,
                Activity::Idle,
                Activity::RunningFullRound,
                Activity::Idle,
            ]
        );
    }
}
