//! Notification sound players

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Arc;

use super::channel::SoundPlayer;

/// Sound backend selected in config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundKind {
    /// Terminal bell on stderr
    #[default]
    Bell,
    None,
}

impl SoundKind {
    pub fn player(&self) -> Arc<dyn SoundPlayer> {
        match self {
            SoundKind::Bell => Arc::new(TerminalBell),
            SoundKind::None => Arc::new(SilentPlayer),
        }
    }
}

/// Rings the terminal bell (BEL on stderr)
pub struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn name(&self) -> &str {
        "bell"
    }

    fn play(&self) -> Result<()> {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

/// Plays nothing
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn name(&self) -> &str {
        "none"
    }

    fn play(&self) -> Result<()> {
        Ok(())
    }
}
