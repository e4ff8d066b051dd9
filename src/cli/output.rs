//! Output formatting for CLI commands

use serde::Serialize;

use crate::notification::Decision;

/// Format output as pretty JSON
pub fn format_output<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// One-line-per-field human rendering of a decision
pub fn format_decision(decision: &Decision) -> String {
    match decision {
        Decision::Alert(alert) => {
            let mut out = String::from("ALERT\n");
            out.push_str(&format!("  title:    {}\n", alert.title));
            out.push_str(&format!("  body:     {}\n", alert.body));
            out.push_str(&format!("  channel:  {} (team {})\n", alert.channel_id, alert.team_id));
            out.push_str(&format!("  duration: {} ms\n", alert.duration_ms));
            out.push_str(&format!(
                "  sound:    {}",
                if alert.play_sound {
                    "play"
                } else if alert.suppress_sound {
                    "off"
                } else {
                    "left to client"
                }
            ));
            out
        }
        Decision::Suppressed { reason } => format!("SUPPRESSED ({})", reason),
    }
}
