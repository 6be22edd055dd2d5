//! Commands and their wire format.

pub mod entities;
pub mod wire;

pub use entities::{Activity, Command};
pub use wire::{decode_command, decode_command_bytes, encode_command};
