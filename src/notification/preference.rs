//! Desktop notify level and its layered resolution
//!
//! A user stores a default level; each channel membership may carry an
//! override. The store encodes "no override" as the string `default`.

use serde::{Deserialize, Serialize};

/// Desktop notification level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    /// Inherit from the user default
    #[default]
    Default,
    All,
    Mention,
    None,
}

impl std::fmt::Display for NotifyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NotifyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" | "" => Ok(NotifyLevel::Default),
            "all" => Ok(NotifyLevel::All),
            "mention" => Ok(NotifyLevel::Mention),
            "none" => Ok(NotifyLevel::None),
            other => Err(format!("unknown notify level: {}", other)),
        }
    }
}

impl NotifyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyLevel::Default => "default",
            NotifyLevel::All => "all",
            NotifyLevel::Mention => "mention",
            NotifyLevel::None => "none",
        }
    }

    /// Whether this level lets a message through without a mention.
    ///
    /// An unresolved `Default` (user never picked a level) behaves like `All`.
    pub fn allows_unmentioned(&self) -> bool {
        matches!(self, NotifyLevel::All | NotifyLevel::Default)
    }
}

/// Resolve the effective level: channel override unless it is absent or `default`
pub fn resolve(user_default: NotifyLevel, channel_override: Option<NotifyLevel>) -> NotifyLevel {
    match channel_override {
        Some(level) if level != NotifyLevel::Default => level,
        _ => user_default,
    }
}
