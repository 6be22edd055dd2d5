//! Command queue shared between command sources and the processor.
//!
//! FIFO, unbounded, many producers, one consumer. Built on a tokio
//! unbounded mpsc channel: producers never block, and the consumer waits
//! for the next command with a bounded timeout so it can re-check the round
//! budget without spinning.

use roundtable_domain::Command;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// The consumer is gone; the command was not queued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("command queue closed")]
pub struct QueueClosed(pub Command);

/// Create a connected sender/receiver pair.
pub fn command_queue() -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CommandSender { tx }, CommandReceiver { rx })
}

/// Producer handle; cheap to clone, one per source.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<Command>,
}

impl CommandSender {
    /// Enqueue `command` behind everything already queued.
    pub fn push(&self, command: Command) -> Result<(), QueueClosed> {
        self.tx.send(command).map_err(|e| QueueClosed(e.0))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Result of waiting on the queue.
#[derive(Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Every command that was queued when the wait ended, in FIFO order.
    Ready(Vec<Command>),
    /// Nothing arrived within the poll interval.
    Idle,
    /// Every sender is gone and the queue is empty.
    Closed,
}

/// Consumer handle, owned by the command processor.
#[derive(Debug)]
pub struct CommandReceiver {
    rx: mpsc::UnboundedReceiver<Command>,
}

impl CommandReceiver {
    /// Wait up to `poll_interval` for the queue to become non-empty, then
    /// take everything currently queued.
    pub async fn next_batch(&mut self, poll_interval: Duration) -> WaitOutcome {
        match tokio::time::timeout(poll_interval, self.rx.recv()).await {
            Ok(Some(first)) => {
                let mut batch = vec![first];
                batch.extend(self.drain());
                WaitOutcome::Ready(batch)
            }
            Ok(None) => WaitOutcome::Closed,
            Err(_) => WaitOutcome::Idle,
        }
    }

    /// Take every command queued right now without waiting.
    pub fn drain(&mut self) -> Vec<Command> {
        let mut drained = Vec::new();
        while let Ok(command) = self.rx.try_recv() {
            drained.push(command);
        }
        drained
    }
}
