//! Alert channel and sound player traits

use anyhow::Result;

use super::alert::AlertRequest;

/// Send result
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// Delivered
    Sent,
    /// Skipped (dry-run or filtered)
    Skipped(String),
    /// Failed
    Failed(String),
}

/// Something that can render a desktop alert
pub trait AlertChannel: Send + Sync {
    /// Channel name (logs and config)
    fn name(&self) -> &str;

    /// Send and wait for the renderer
    fn send(&self, alert: &AlertRequest) -> Result<SendResult>;

    /// Fire-and-forget send (returns right after spawning)
    fn send_async(&self, alert: &AlertRequest) -> Result<()>;
}

/// Plays the notification sound
pub trait SoundPlayer: Send + Sync {
    fn name(&self) -> &str;

    fn play(&self) -> Result<()>;
}
