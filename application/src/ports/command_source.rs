//! Command source port
//!
//! A command source runs next to the processor, decodes inbound messages and
//! pushes the resulting [`Command`](roundtable_domain::Command)s onto the
//! shared queue. The core never sees the transport.

use crate::queue::CommandSender;
use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that end a command source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Command queue closed")]
    QueueClosed,
}

/// Producer side of the command queue
#[async_trait]
pub trait CommandSource: Send {
    /// Name for logs
    fn name(&self) -> &str;

    /// Produce commands until the source is exhausted or `cancel` fires.
    ///
    /// Commands already pushed stay queued when the source stops.
    async fn run(
        self: Box<Self>,
        queue: CommandSender,
        cancel: CancellationToken,
    ) -> Result<(), SourceError>;
}
