//! Alert title and body composition

use regex::Regex;
use std::sync::OnceLock;

use super::context::{Channel, NotificationContext};
use super::event::{ChannelType, MessageEvent, TransportMetadata};

/// Texts longer than this are truncated
pub const MAX_NOTIFY_TEXT_CHARS: usize = 50;
/// Characters kept when truncating
const TRUNCATED_CHARS: usize = 49;
const ELLIPSIS: &str = "...";

/// Composed alert text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub title: String,
    pub body: String,
}

fn newline_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n+").expect("static newline pattern"))
}

/// Collapse newline runs to a single space and truncate to 49 chars + `...`
pub fn notify_text(message: &str) -> String {
    let text = newline_runs().replace_all(message, " ");
    if text.chars().count() > MAX_NOTIFY_TEXT_CHARS {
        let mut truncated: String = text.chars().take(TRUNCATED_CHARS).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        text.into_owned()
    }
}

/// Builds alert text from a message and the collaborator context
pub struct MessageComposer<'a> {
    ctx: &'a dyn NotificationContext,
}

impl<'a> MessageComposer<'a> {
    pub fn new(ctx: &'a dyn NotificationContext) -> Self {
        Self { ctx }
    }

    pub fn compose(
        &self,
        event: &MessageEvent,
        props: &TransportMetadata,
        channel: Option<&Channel>,
        sender: &str,
    ) -> ComposedMessage {
        ComposedMessage {
            title: self.title(props, channel),
            body: self.body(event, props, sender),
        }
    }

    /// Sender display name: override (if allowed) > transport name > profile > "Someone"
    pub fn sender_name(&self, event: &MessageEvent, props: &TransportMetadata) -> String {
        if let Some(name) = event.override_username() {
            if self.ctx.username_override_enabled() {
                return name.to_string();
            }
        }

        if let Some(name) = props.sender_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        if let Some(profile) = self.ctx.profile(&event.user_id) {
            return profile.username;
        }

        self.ctx.localize("channel_loader.someone", "Someone")
    }

    pub fn title(&self, props: &TransportMetadata, channel: Option<&Channel>) -> String {
        let Some(channel) = channel else {
            return props
                .channel_display_name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| self.ctx.localize("channel_loader.posted", "Posted"));
        };

        match channel.channel_type {
            ChannelType::Direct => self.ctx.localize("notification.dm", "Direct Message"),
            ChannelType::Group => self.ctx.group_channel_name(&channel.id),
            ChannelType::Standard => channel.display_name.clone(),
        }
    }

    pub fn body(&self, event: &MessageEvent, props: &TransportMetadata, sender: &str) -> String {
        let text = notify_text(&event.message);
        if !text.is_empty() {
            let wrote = self.ctx.localize("channel_loader.wrote", " wrote: ");
            return format!("{}{}{}", sender, wrote, text);
        }

        let suffix = if props.image {
            self.ctx.localize("channel_loader.uploadedImage", " uploaded an image")
        } else if props.other_file {
            self.ctx.localize("channel_loader.uploadedFile", " uploaded a file")
        } else {
            self.ctx.localize("channel_loader.something", " did something new")
        };
        format!("{}{}", sender, suffix)
    }
}
