//! CLI command handling

pub mod check;
pub mod output;
pub mod run;

pub use check::*;
pub use output::*;
pub use run::*;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::notification::StaticContext;

/// Load a state snapshot (user, channels, memberships...) from a JSON file
pub fn load_state(path: &Path) -> Result<StaticContext> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read state {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid state {}", path.display()))
}
