//! Desktop Notify CLI
//!
//! Raise desktop notifications from a chat event stream

use anyhow::Result;
use clap::{Parser, Subcommand};
use desktop_notify::cli::{handle_check, handle_run, CheckArgs, RunArgs};
use desktop_notify::EngineConfig;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "dnotify")]
#[command(about = "Desktop Notify - decide whether chat messages should raise a desktop notification")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a JSONL event stream and dispatch alerts
    Run(RunArgs),
    /// Evaluate a single message
    Check(CheckArgs),
    /// Print the config path and the effective config
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log level comes from RUST_LOG, info by default
    // e.g. RUST_LOG=desktop_notify=debug dnotify run --state state.json
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("desktop_notify=info,dnotify=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let stats = handle_run(args).await?;
            info!(
                messages = stats.messages,
                focus_changes = stats.focus_changes,
                alerts = stats.alerts,
                "Done"
            );
        }
        Commands::Check(args) => {
            handle_check(args)?;
        }
        Commands::Config => {
            let path = EngineConfig::path();
            let config = EngineConfig::load()?;
            println!("# {}", path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
