//! Alert request produced by the engine

use serde::{Deserialize, Serialize};

/// Default alert duration when the user has not configured one
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 5000;

/// A desktop alert ready to hand to a rendering channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub title: String,
    pub body: String,
    /// Channel the click should navigate to
    pub channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    pub team_id: String,
    pub duration_ms: u64,
    /// Renderer should stay silent
    pub suppress_sound: bool,
    /// Engine wants an explicit notification sound for this alert
    #[serde(default)]
    pub play_sound: bool,
}

/// Why a message did not produce an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// No current user is known
    NoCurrentUser,
    /// The user wrote it (and not through a webhook)
    OwnMessage,
    SystemMessage,
    /// Effective notify level is `none`
    LevelNone,
    /// Mentions-only and the user was not mentioned
    NotMentioned,
    /// The user is looking at that channel right now
    ViewingChannel,
}

impl std::fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SuppressReason::NoCurrentUser => "no current user",
            SuppressReason::OwnMessage => "own message",
            SuppressReason::SystemMessage => "system message",
            SuppressReason::LevelNone => "notify level is none",
            SuppressReason::NotMentioned => "not mentioned",
            SuppressReason::ViewingChannel => "channel is focused",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of evaluating one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Alert(AlertRequest),
    Suppressed { reason: SuppressReason },
}

impl Decision {
    pub fn is_alert(&self) -> bool {
        matches!(self, Decision::Alert(_))
    }

    pub fn into_alert(self) -> Option<AlertRequest> {
        match self {
            Decision::Alert(alert) => Some(alert),
            Decision::Suppressed { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<SuppressReason> {
        match self {
            Decision::Alert(_) => None,
            Decision::Suppressed { reason } => Some(*reason),
        }
    }
}
