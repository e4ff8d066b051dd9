//! Config - ~/.config/desktop-notify/config.json
//!
//! A missing file means defaults; missing fields fall back one by one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::notification::alert::DEFAULT_NOTIFICATION_DURATION_MS;
use crate::notification::channels::CommandChannelConfig;
use crate::notification::sound::SoundKind;

/// Available alert channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// One JSON line per alert
    Stdout,
    /// External notifier command
    Command,
}

/// Engine and dispatch config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Alert duration (ms) when the user has none configured
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,
    /// Whether the window starts focused
    #[serde(default)]
    pub initial_focus: bool,
    /// Print instead of sending
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelKind>,
    #[serde(default)]
    pub command: CommandChannelConfig,
    #[serde(default)]
    pub sound: SoundKind,
}

fn default_duration_ms() -> u64 {
    DEFAULT_NOTIFICATION_DURATION_MS
}

fn default_channels() -> Vec<ChannelKind> {
    vec![ChannelKind::Stdout]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration_ms(),
            initial_focus: false,
            dry_run: false,
            channels: default_channels(),
            command: CommandChannelConfig::default(),
            sound: SoundKind::default(),
        }
    }
}

impl EngineConfig {
    /// Default config file path
    pub fn path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("desktop-notify")
            .join("config.json")
    }

    /// Load from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}
