//! Alert dispatcher - owns the channels and routes alerts to them

use super::alert::AlertRequest;
use super::channel::{AlertChannel, SendResult, SoundPlayer};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Alert dispatcher - owns the channels and routes alerts to them
pub struct AlertDispatcher {
    /// Registered channels
    channels: Vec<Arc<dyn AlertChannel>>,
    /// Notification sound
    sound: Option<Arc<dyn SoundPlayer>>,
    /// Dry-run mode
    dry_run: bool,
}

impl AlertDispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
            sound: None,
            dry_run: false,
        }
    }

    /// Set dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_sound(mut self, sound: Arc<dyn SoundPlayer>) -> Self {
        info!(sound = sound.name(), "Registering sound player");
        self.sound = Some(sound);
        self
    }

    /// Register a channel
    pub fn register_channel(&mut self, channel: Arc<dyn AlertChannel>) {
        info!(channel = channel.name(), "Registering alert channel");
        self.channels.push(channel);
    }

    /// Send an alert to every channel and collect the results
    pub fn send_sync(&self, alert: &AlertRequest) -> Result<Vec<(String, SendResult)>> {
        let mut results = Vec::new();

        for channel in &self.channels {
            let name = channel.name().to_string();

            if self.dry_run {
                eprintln!("[DRY-RUN] Would send to channel: {}", name);
                results.push((name, SendResult::Skipped("dry-run".to_string())));
                continue;
            }

            let result = match channel.send(alert) {
                Ok(r) => r,
                Err(e) => {
                    warn!(channel = %name, error = %e, "Channel send failed");
                    SendResult::Failed(e.to_string())
                }
            };

            results.push((name, result));
        }

        self.ring(alert);
        Ok(results)
    }

    /// Fire-and-forget send; failures are only logged
    pub fn dispatch(&self, alert: &AlertRequest) {
        for channel in &self.channels {
            if self.dry_run {
                eprintln!("[DRY-RUN] Would send async to channel: {}", channel.name());
                continue;
            }

            if let Err(e) = channel.send_async(alert) {
                warn!(channel = channel.name(), error = %e, "Channel async send failed");
            }
        }

        self.ring(alert);
    }

    fn ring(&self, alert: &AlertRequest) {
        if !alert.play_sound || self.dry_run {
            return;
        }
        let Some(sound) = &self.sound else {
            debug!("No sound player registered");
            return;
        };
        if let Err(e) = sound.play() {
            warn!(sound = sound.name(), error = %e, "Notification sound failed");
        }
    }

    /// Number of registered channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Names of registered channels
    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }
}

impl Default for AlertDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
