//! UDP command listener: one JSON wire message per datagram.

use async_trait::async_trait;
use roundtable_application::ports::command_source::{CommandSource, SourceError};
use roundtable_application::queue::CommandSender;
use roundtable_domain::decode_command_bytes;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Largest datagram accepted
const MAX_DATAGRAM: usize = 64 * 1024;

pub struct UdpCommandSource {
    socket: UdpSocket,
}

impl UdpCommandSource {
    /// Bind the listening socket
    pub async fn bind(addr: SocketAddr) -> Result<Self, SourceError> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, SourceError> {
        Ok(self.socket.local_addr()?)
    }
}

#[async_trait]
impl CommandSource for UdpCommandSource {
    fn name(&self) -> &str {
        "udp"
    }

    async fn run(
        self: Box<Self>,
        queue: CommandSender,
        cancel: CancellationToken,
    ) -> Result<(), SourceError> {
        info!("Listening for commands on udp://{}", self.local_addr()?);
        let mut buf = vec![0u8; MAX_DATAGRAM];

        loop {
            let (len, peer) = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("UDP listener cancelled");
                    return Ok(());
                }
                received = self.socket.recv_from(&mut buf) => received?,
            };

            match decode_command_bytes(&buf[..len]) {
                Ok(command) => {
                    debug!("Received '{}' from {}", command.kind(), peer);
                    queue.push(command).map_err(|_| SourceError::QueueClosed)?;
                }
                Err(e) => warn!("Ignoring datagram from {}: {}", peer, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_application::queue::{WaitOutcome, command_queue};
    use roundtable_domain::Command;
    use std::time::Duration;

    #[tokio::test]
    async fn test_datagrams_become_commands() {
        let source = UdpCommandSource::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let addr = source.local_addr().unwrap();
        let (tx, mut rx) = command_queue();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(Box::new(source).run(tx, cancel.clone()));

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(br#"{"command": "start"}"#, addr).await.unwrap();
        client.send_to(b"not json at all", addr).await.unwrap();
        client
            .send_to(br#"{"command": "chat_in_round", "content": "Trams"}"#, addr)
            .await
            .unwrap();

        let mut received = Vec::new();
        while received.len() < 2 {
            if let WaitOutcome::Ready(batch) = rx.next_batch(Duration::from_secs(2)).await {
                received.extend(batch);
            }
        }
        assert_eq!(
            received,
            vec![Command::StartRound, Command::InjectProposal("Trams".into())]
        );

        cancel.cancel();
        handle.await.unwrap().unwrap();
    }
}
