//! Run command - drive the notification service from a JSONL event stream
//!
//! One InboundEvent per line; lines that are not UTF-8 or not valid JSON are
//! logged and skipped.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::load_state;
use crate::config::EngineConfig;
use crate::notification::{DispatcherBuilder, EligibilityEngine, InboundEvent, NotificationService, ServiceStats};

const EVENT_BUFFER: usize = 64;

/// Run command arguments
#[derive(Args)]
pub struct RunArgs {
    /// State snapshot JSON
    #[arg(long, short)]
    pub state: PathBuf,

    /// JSONL event file (stdin when omitted)
    #[arg(long, short)]
    pub events: Option<PathBuf>,

    /// Config file (default ~/.config/desktop-notify/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dry-run mode (print instead of sending)
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle the run command
pub async fn handle_run(args: RunArgs) -> Result<ServiceStats> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };
    config.dry_run |= args.dry_run;

    let ctx = load_state(&args.state)?;
    let service = NotificationService::new(
        EligibilityEngine::new()
            .with_default_duration_ms(config.default_duration_ms)
            .with_focus(config.initial_focus),
        Box::new(ctx),
        DispatcherBuilder::from_config(&config).build(),
    );
    let (tx, handle) = service.spawn(EVENT_BUFFER);

    let fed = match &args.events {
        Some(path) => match tokio::fs::File::open(path).await {
            Ok(file) => feed_events(BufReader::new(file), &tx).await,
            Err(e) => Err::<usize, _>(e).with_context(|| format!("failed to open events {}", path.display())),
        },
        None => feed_events(BufReader::new(tokio::io::stdin()), &tx).await,
    };
    drop(tx);

    // Let the service drain whatever was already queued before reporting a feed error
    let stats = handle.await.context("notification service panicked")?;
    let sent = fed?;
    debug!(sent, "Event stream finished");
    Ok(stats)
}

/// Parse lines into events and send them; returns how many were sent
pub async fn feed_events<R>(mut reader: R, tx: &mpsc::Sender<InboundEvent>) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut sent = 0;
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping non UTF-8 event line");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let event: InboundEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping malformed event");
                continue;
            }
        };

        if tx.send(event).await.is_err() {
            warn!("Notification service stopped early");
            break;
        }
        sent += 1;
    }

    Ok(sent)
}
