//! Alert channel implementations

pub mod command;
pub mod stdout;

pub use command::{CommandChannel, CommandChannelConfig};
pub use stdout::StdoutChannel;
