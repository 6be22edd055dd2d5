//! Command sources feeding the command queue

mod scripted;
mod udp;

pub use scripted::{ScriptedCommandSource, parse_script};
pub use udp::UdpCommandSource;
