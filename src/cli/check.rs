//! Check command - print the decision for a single message

use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use super::{format_decision, format_output, load_state};
use crate::config::EngineConfig;
use crate::notification::{EligibilityEngine, InboundEvent};

/// Check command arguments
#[derive(Args)]
pub struct CheckArgs {
    /// State snapshot JSON
    #[arg(long, short)]
    pub state: PathBuf,

    /// message_received event JSON
    #[arg(long, short)]
    pub event: PathBuf,

    /// Assume the window has focus
    #[arg(long)]
    pub focused: bool,

    /// Config file (default ~/.config/desktop-notify/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the check command
pub fn handle_check(args: CheckArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };
    let ctx = load_state(&args.state)?;

    let content = fs::read_to_string(&args.event)
        .with_context(|| format!("failed to read event {}", args.event.display()))?;
    let event: InboundEvent = serde_json::from_str(&content)
        .with_context(|| format!("invalid event {}", args.event.display()))?;
    let InboundEvent::MessageReceived { post, props } = event else {
        bail!("check expects a message_received event");
    };

    let engine = EligibilityEngine::new()
        .with_default_duration_ms(config.default_duration_ms)
        .with_focus(args.focused || config.initial_focus);
    let decision = engine.evaluate(&post, &props, &ctx);

    if args.json {
        println!("{}", format_output(&decision));
    } else {
        println!("{}", format_decision(&decision));
    }
    Ok(())
}
