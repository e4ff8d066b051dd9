//! External command channel - renders alerts through a system notifier (notify-send by default)

use anyhow::{anyhow, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use tracing::{debug, error, info};

use crate::notification::alert::AlertRequest;
use crate::notification::channel::{AlertChannel, SendResult};

/// External command channel config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandChannelConfig {
    /// Program name or path
    pub program: String,
    /// Argument template; supports {title} {body} {duration_ms} {channel_id}
    /// {team_id} {suppress_sound}
    pub args: Vec<String>,
}

impl CommandChannelConfig {
    /// `notify-send --expire-time=<ms> --app-name=desktop-notify --hint=boolean:suppress-sound:<bool> <title> <body>`
    pub fn notify_send() -> Self {
        Self {
            program: "notify-send".to_string(),
            args: vec![
                "--expire-time={duration_ms}".to_string(),
                "--app-name=desktop-notify".to_string(),
                "--hint=boolean:suppress-sound:{suppress_sound}".to_string(),
                "{title}".to_string(),
                "{body}".to_string(),
            ],
        }
    }
}

impl Default for CommandChannelConfig {
    fn default() -> Self {
        Self::notify_send()
    }
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{(title|body|duration_ms|channel_id|team_id|suppress_sound)\}")
            .expect("static placeholder pattern")
    })
}

/// External command channel
pub struct CommandChannel {
    config: CommandChannelConfig,
}

impl CommandChannel {
    pub fn new(config: CommandChannelConfig) -> Self {
        Self { config }
    }

    /// Whether the program is on PATH
    pub fn is_available(&self) -> bool {
        which::which(&self.config.program).is_ok()
    }

    /// Substitute alert fields into the template in a single pass, so a value
    /// containing a placeholder is never expanded again
    pub fn render_args(&self, alert: &AlertRequest) -> Vec<String> {
        self.config
            .args
            .iter()
            .map(|arg| {
                placeholder()
                    .replace_all(arg, |caps: &Captures| match &caps[1] {
                        "title" => alert.title.clone(),
                        "body" => alert.body.clone(),
                        "duration_ms" => alert.duration_ms.to_string(),
                        "channel_id" => alert.channel_id.clone(),
                        "team_id" => alert.team_id.clone(),
                        "suppress_sound" => alert.suppress_sound.to_string(),
                        other => format!("{{{}}}", other),
                    })
                    .into_owned()
            })
            .collect()
    }
}

/// Wait on the child off the caller's path so it does not linger as a zombie
fn reap(mut child: Child) {
    let wait = move || match child.wait() {
        Ok(status) => debug!(%status, "Notifier exited"),
        Err(e) => debug!(error = %e, "Failed to wait for notifier"),
    };
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(wait);
        }
        Err(_) => {
            std::thread::spawn(wait);
        }
    }
}

impl AlertChannel for CommandChannel {
    fn name(&self) -> &str {
        "command"
    }

    fn send(&self, alert: &AlertRequest) -> Result<SendResult> {
        let output = Command::new(&self.config.program)
            .args(self.render_args(alert))
            .output()
            .map_err(|e| anyhow!("failed to run {}: {}", self.config.program, e))?;

        if output.status.success() {
            info!(
                channel = "command",
                program = %self.config.program,
                channel_id = %alert.channel_id,
                "Alert rendered"
            );
            Ok(SendResult::Sent)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(
                channel = "command",
                program = %self.config.program,
                error = %stderr,
                "Failed to render alert"
            );
            Ok(SendResult::Failed(stderr.to_string()))
        }
    }

    fn send_async(&self, alert: &AlertRequest) -> Result<()> {
        // spawn() returns immediately; the child is reaped in the background
        let child = Command::new(&self.config.program)
            .args(self.render_args(alert))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| anyhow!("failed to spawn {}: {}", self.config.program, e))?;
        reap(child);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert() -> AlertRequest {
        AlertRequest {
            title: "Town Square".to_string(),
            body: "alice wrote: {title} is literal".to_string(),
            channel_id: "c1".to_string(),
            channel_name: None,
            team_id: "t1".to_string(),
            duration_ms: 7000,
            suppress_sound: true,
            play_sound: false,
        }
    }

    #[test]
    fn test_render_args_notify_send() {
        let channel = CommandChannel::new(CommandChannelConfig::notify_send());
        let args = channel.render_args(&alert());
        assert_eq!(
            args,
            vec![
                "--expire-time=7000",
                "--app-name=desktop-notify",
                "--hint=boolean:suppress-sound:true",
                "Town Square",
                "alice wrote: {title} is literal",
            ]
        );
    }

    #[test]
    fn test_render_args_does_not_expand_values() {
        let channel = CommandChannel::new(CommandChannelConfig::notify_send());
        let alert = AlertRequest {
            title: "Release {body} {team_id}".to_string(),
            body: "alice wrote: hi".to_string(),
            suppress_sound: false,
            ..alert()
        };
        let args = channel.render_args(&alert);
        assert_eq!(args[2], "--hint=boolean:suppress-sound:false");
        assert_eq!(args[3], "Release {body} {team_id}");
        assert_eq!(args[4], "alice wrote: hi");
    }

    #[test]
    fn test_render_args_custom_template() {
        let channel = CommandChannel::new(CommandChannelConfig {
            program: "echo".to_string(),
            args: vec!["{team_id}/{channel_id}".to_string(), "static {unknown}".to_string()],
        });
        assert_eq!(channel.render_args(&alert()), vec!["t1/c1", "static {unknown}"]);
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let channel = CommandChannel::new(CommandChannelConfig {
            program: "definitely-not-a-real-notifier-binary".to_string(),
            args: vec![],
        });
        assert!(!channel.is_available());
        assert!(channel.send(&alert()).is_err());
        assert!(channel.send_async(&alert()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_send_async_reaps_child() {
        let channel = CommandChannel::new(CommandChannelConfig {
            program: "true".to_string(),
            args: vec![],
        });
        if channel.is_available() {
            assert!(channel.send_async(&alert()).is_ok());
        }
    }
}
