//! Stdout channel - one JSON line per alert

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::notification::alert::AlertRequest;
use crate::notification::channel::{AlertChannel, SendResult};

/// Output record (JSONL)
#[derive(Debug, Serialize)]
struct AlertLine<'a> {
    /// ISO8601 timestamp
    ts: DateTime<Utc>,
    #[serde(flatten)]
    alert: &'a AlertRequest,
}

/// Stdout channel, consumed by scripts or a host UI
pub struct StdoutChannel;

impl StdoutChannel {
    pub fn new() -> Self {
        Self
    }

    /// Format as a single JSON line
    pub fn format_line(alert: &AlertRequest, ts: DateTime<Utc>) -> Result<String> {
        Ok(serde_json::to_string(&AlertLine { ts, alert })?)
    }
}

impl Default for StdoutChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertChannel for StdoutChannel {
    fn name(&self) -> &str {
        "stdout"
    }

    fn send(&self, alert: &AlertRequest) -> Result<SendResult> {
        let line = Self::format_line(alert, Utc::now())?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        stdout.flush()?;
        debug!(channel = "stdout", channel_id = %alert.channel_id, "Alert written");
        Ok(SendResult::Sent)
    }

    fn send_async(&self, alert: &AlertRequest) -> Result<()> {
        // Writing stdout is fast, do it inline
        self.send(alert).map(|_| ())
    }
}
