//! Dispatcher builder - assembles an AlertDispatcher from config

use super::channels::{CommandChannel, CommandChannelConfig, StdoutChannel};
use super::dispatcher::AlertDispatcher;
use super::sound::SoundKind;
use crate::config::{ChannelKind, EngineConfig};
use std::sync::Arc;
use tracing::{info, warn};

/// Dispatcher builder
pub struct DispatcherBuilder {
    channels: Vec<ChannelKind>,
    command: CommandChannelConfig,
    sound: SoundKind,
    dry_run: bool,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            channels: vec![ChannelKind::Stdout],
            command: CommandChannelConfig::default(),
            sound: SoundKind::default(),
            dry_run: false,
        }
    }

    /// Start from config
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            channels: config.channels.clone(),
            command: config.command.clone(),
            sound: config.sound,
            dry_run: config.dry_run,
        }
    }

    /// Set enabled channels
    pub fn channels(mut self, channels: Vec<ChannelKind>) -> Self {
        self.channels = channels;
        self
    }

    /// Set the external notifier command
    pub fn command(mut self, command: CommandChannelConfig) -> Self {
        self.command = command;
        self
    }

    pub fn sound(mut self, sound: SoundKind) -> Self {
        self.sound = sound;
        self
    }

    /// Set dry-run mode
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Build the dispatcher; an unavailable notifier command is skipped with a warning
    pub fn build(self) -> AlertDispatcher {
        let mut dispatcher = AlertDispatcher::new()
            .with_dry_run(self.dry_run)
            .with_sound(self.sound.player());

        let mut seen = Vec::new();
        for kind in self.channels {
            if seen.contains(&kind) {
                continue;
            }
            seen.push(kind);

            match kind {
                ChannelKind::Stdout => {
                    dispatcher.register_channel(Arc::new(StdoutChannel::new()));
                }
                ChannelKind::Command => {
                    let channel = CommandChannel::new(self.command.clone());
                    if channel.is_available() {
                        info!(program = %self.command.program, "Detected notifier command");
                        dispatcher.register_channel(Arc::new(channel));
                    } else {
                        warn!(program = %self.command.program, "Notifier command not found, skipping");
                    }
                }
            }
        }

        dispatcher
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
