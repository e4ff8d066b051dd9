//! Inbound event structures
//!
//! Field names follow the chat server's websocket encoding so events can be
//! fed straight from the wire: string booleans (`"true"`), single-letter
//! channel types and a JSON-encoded mention list.

use serde::{Deserialize, Deserializer, Serialize};

/// Post type prefix used by server-generated messages (joins, header changes...)
pub const SYSTEM_MESSAGE_PREFIX: &str = "system_";

/// Channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelType {
    /// Two-participant private channel (`D`)
    Direct,
    /// Small multi-participant private channel without its own name (`G`)
    Group,
    /// Public or private named channel (`O` / `P`)
    Standard,
}

impl From<String> for ChannelType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "D" => ChannelType::Direct,
            "G" => ChannelType::Group,
            _ => ChannelType::Standard,
        }
    }
}

impl From<ChannelType> for String {
    fn from(t: ChannelType) -> Self {
        match t {
            ChannelType::Direct => "D",
            ChannelType::Group => "G",
            ChannelType::Standard => "O",
        }
        .to_string()
    }
}

/// Post properties set by integrations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostProps {
    /// Posted through an incoming webhook
    #[serde(default, deserialize_with = "lenient_bool")]
    pub from_webhook: bool,
    /// Display name the integration asked for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_username: Option<String>,
}

/// An inbound chat message (post)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Author
    pub user_id: String,
    pub channel_id: String,
    /// Raw message text
    #[serde(default)]
    pub message: String,
    /// Post type; empty for ordinary messages
    #[serde(default, rename = "type")]
    pub post_type: String,
    #[serde(default)]
    pub props: PostProps,
}

impl MessageEvent {
    pub fn new(
        user_id: impl Into<String>,
        channel_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            channel_id: channel_id.into(),
            message: message.into(),
            post_type: String::new(),
            props: PostProps::default(),
        }
    }

    pub fn with_post_type(mut self, post_type: impl Into<String>) -> Self {
        self.post_type = post_type.into();
        self
    }

    pub fn with_webhook(mut self, from_webhook: bool) -> Self {
        self.props.from_webhook = from_webhook;
        self
    }

    pub fn with_override_username(mut self, name: impl Into<String>) -> Self {
        self.props.override_username = Some(name.into());
        self
    }

    /// Server-generated message
    pub fn is_system_message(&self) -> bool {
        self.post_type.starts_with(SYSTEM_MESSAGE_PREFIX)
    }

    pub fn is_from_webhook(&self) -> bool {
        self.props.from_webhook
    }

    pub fn override_username(&self) -> Option<&str> {
        self.props
            .override_username
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

/// Metadata the transport sends alongside a message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportMetadata {
    /// JSON-encoded array of mentioned user ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<String>,
    #[serde(default)]
    pub team_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_type: Option<ChannelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    /// Message carries an image attachment
    #[serde(default, deserialize_with = "lenient_bool")]
    pub image: bool,
    /// Message carries a non-image file attachment
    #[serde(default, rename = "otherFile", alias = "other_file", deserialize_with = "lenient_bool")]
    pub other_file: bool,
}

impl TransportMetadata {
    pub fn new(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            ..Default::default()
        }
    }

    pub fn with_mentions(mut self, mentions: impl Into<String>) -> Self {
        self.mentions = Some(mentions.into());
        self
    }

    pub fn with_channel_type(mut self, channel_type: ChannelType) -> Self {
        self.channel_type = Some(channel_type);
        self
    }

    pub fn with_channel_display_name(mut self, name: impl Into<String>) -> Self {
        self.channel_display_name = Some(name.into());
        self
    }

    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    pub fn with_image(mut self) -> Self {
        self.image = true;
        self
    }

    pub fn with_other_file(mut self) -> Self {
        self.other_file = true;
        self
    }
}

/// Events consumed by the notification service loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// A message arrived over the transport
    MessageReceived {
        post: MessageEvent,
        #[serde(default)]
        props: TransportMetadata,
    },
    /// The client window gained or lost input focus
    FocusChanged { focused: bool },
}

/// Accept `true`, `"true"`, `"false"`, `null` and friends; anything else is `false`
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_event_from_wire() {
        let json = r#"{
            "id": "p1",
            "user_id": "u2",
            "channel_id": "c1",
            "message": "hello",
            "type": "",
            "props": {"from_webhook": "true", "override_username": "bot"}
        }"#;
        let event: MessageEvent = serde_json::from_str(json).unwrap();
        assert!(event.is_from_webhook());
        assert_eq!(event.override_username(), Some("bot"));
        assert!(!event.is_system_message());
    }

    #[test]
    fn test_system_message_detection() {
        let event = MessageEvent::new("u1", "c1", "").with_post_type("system_join_channel");
        assert!(event.is_system_message());
        let event = MessageEvent::new("u1", "c1", "").with_post_type("custom_poll");
        assert!(!event.is_system_message());
    }

    #[test]
    fn test_empty_override_username_is_ignored() {
        let event = MessageEvent::new("u1", "c1", "hi").with_override_username("");
        assert_eq!(event.override_username(), None);
    }

    #[test]
    fn test_channel_type_wire_encoding() {
        let t: ChannelType = serde_json::from_str(r#""D""#).unwrap();
        assert_eq!(t, ChannelType::Direct);
        let t: ChannelType = serde_json::from_str(r#""G""#).unwrap();
        assert_eq!(t, ChannelType::Group);
        let t: ChannelType = serde_json::from_str(r#""P""#).unwrap();
        assert_eq!(t, ChannelType::Standard);
        assert_eq!(serde_json::to_string(&ChannelType::Direct).unwrap(), r#""D""#);
    }

    #[test]
    fn test_transport_metadata_from_wire() {
        let json = r#"{
            "mentions": "[\"u1\"]",
            "team_id": "t1",
            "channel_type": "O",
            "channel_display_name": "Town Square",
            "sender_name": "alice",
            "image": "true",
            "otherFile": false
        }"#;
        let props: TransportMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(props.team_id, "t1");
        assert_eq!(props.channel_type, Some(ChannelType::Standard));
        assert!(props.image);
        assert!(!props.other_file);
    }

    #[test]
    fn test_inbound_event_tagging() {
        let json = r#"{"type": "focus_changed", "focused": true}"#;
        let event: InboundEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, InboundEvent::FocusChanged { focused: true }));

        let json = r#"{"type": "message_received", "post": {"user_id": "u2", "channel_id": "c1", "message": "hi"}}"#;
        let event: InboundEvent = serde_json::from_str(json).unwrap();
        match event {
            InboundEvent::MessageReceived { post, props } => {
                assert_eq!(post.channel_id, "c1");
                assert!(props.mentions.is_none());
            }
            _ => panic!("expected message_received"),
        }
    }
}
