//! Read-side collaborators the engine consults while deciding
//!
//! The engine never owns user, channel or membership data. It asks a
//! `NotificationContext` for them at decision time. `StaticContext` is an
//! in-memory snapshot used by the CLI and tests.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use super::event::ChannelType;
use super::preference::NotifyLevel;

/// Per-user notification preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyProps {
    /// Desktop notify level
    #[serde(default, deserialize_with = "lenient_level")]
    pub desktop: NotifyLevel,
    /// Desktop sound; `None` means never set
    #[serde(default, deserialize_with = "lenient_opt_bool")]
    pub desktop_sound: Option<bool>,
    /// Desktop alert duration in seconds
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub desktop_duration: Option<u64>,
}

/// User profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub notify_props: NotifyProps,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            notify_props: NotifyProps::default(),
        }
    }

    pub fn with_notify_props(mut self, notify_props: NotifyProps) -> Self {
        self.notify_props = notify_props;
        self
    }
}

/// Locally known channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
}

impl Channel {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, channel_type: ChannelType) -> Self {
        let display_name = display_name.into();
        Self {
            id: id.into(),
            name: display_name.to_lowercase().replace(' ', "-"),
            display_name,
            channel_type,
        }
    }
}

/// Per-channel override of the user's notify level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelNotifyProps {
    #[serde(default, deserialize_with = "lenient_opt_level")]
    pub desktop: Option<NotifyLevel>,
}

/// The current user's membership in a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMember {
    pub channel_id: String,
    pub user_id: String,
    #[serde(default)]
    pub notify_props: ChannelNotifyProps,
}

/// Which client build is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientVariant {
    /// Native desktop app (Windows shell)
    DesktopNative,
    /// Platform-native app (macOS shell)
    PlatformNative,
    /// Mobile app webview
    MobileNative,
    /// Plain browser
    Browser,
}

impl ClientVariant {
    /// Native shells play their own notification sound
    pub fn provides_own_sound(&self) -> bool {
        matches!(
            self,
            ClientVariant::DesktopNative | ClientVariant::PlatformNative | ClientVariant::MobileNative
        )
    }
}

impl std::str::FromStr for ClientVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop-native" => Ok(ClientVariant::DesktopNative),
            "platform-native" => Ok(ClientVariant::PlatformNative),
            "mobile-native" => Ok(ClientVariant::MobileNative),
            "browser" => Ok(ClientVariant::Browser),
            other => Err(format!("unknown client variant: {}", other)),
        }
    }
}

/// Collaborator lookups used by the engine and composer
pub trait NotificationContext: Send + Sync {
    /// The receiving user; `None` suppresses every alert
    fn current_user(&self) -> Option<UserProfile>;

    fn profile(&self, user_id: &str) -> Option<UserProfile>;

    fn channel(&self, channel_id: &str) -> Option<Channel>;

    /// The current user's membership in `channel_id`
    fn my_member(&self, channel_id: &str) -> Option<ChannelMember>;

    fn active_channel_id(&self) -> Option<String>;

    /// Display name for a group channel, computed from its members
    fn group_channel_name(&self, channel_id: &str) -> String;

    /// `None` when the host cannot tell which client is running
    fn client_variant(&self) -> Option<ClientVariant>;

    /// Server policy allowing integrations to override the post author name
    fn username_override_enabled(&self) -> bool;

    /// Localized string for `id`, or `default` when no translation exists
    fn localize(&self, _id: &str, default: &str) -> String {
        default.to_string()
    }
}

/// In-memory snapshot of everything the engine reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticContext {
    #[serde(default)]
    pub current_user: Option<UserProfile>,
    /// Known profiles by user id
    #[serde(default)]
    pub profiles: HashMap<String, UserProfile>,
    #[serde(default)]
    pub channels: HashMap<String, Channel>,
    /// Current user's memberships by channel id
    #[serde(default)]
    pub members: HashMap<String, ChannelMember>,
    /// User ids in each channel, used to name group channels
    #[serde(default)]
    pub channel_members: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub active_channel_id: Option<String>,
    #[serde(default)]
    pub client_variant: Option<ClientVariant>,
    #[serde(default)]
    pub enable_post_username_override: bool,
    /// Translations by message id
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

impl StaticContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current_user(mut self, user: UserProfile) -> Self {
        self.profiles.insert(user.id.clone(), user.clone());
        self.current_user = Some(user);
        self
    }

    pub fn with_profile(mut self, user: UserProfile) -> Self {
        self.profiles.insert(user.id.clone(), user);
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.insert(channel.id.clone(), channel);
        self
    }

    /// Record the current user's override for a channel
    pub fn with_channel_override(mut self, channel_id: impl Into<String>, level: NotifyLevel) -> Self {
        let channel_id = channel_id.into();
        let user_id = self
            .current_user
            .as_ref()
            .map(|u| u.id.clone())
            .unwrap_or_default();
        self.members.insert(
            channel_id.clone(),
            ChannelMember {
                channel_id,
                user_id,
                notify_props: ChannelNotifyProps { desktop: Some(level) },
            },
        );
        self
    }

    pub fn with_channel_members(mut self, channel_id: impl Into<String>, user_ids: Vec<String>) -> Self {
        self.channel_members.insert(channel_id.into(), user_ids);
        self
    }

    pub fn with_active_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.active_channel_id = Some(channel_id.into());
        self
    }

    pub fn with_client_variant(mut self, variant: ClientVariant) -> Self {
        self.client_variant = Some(variant);
        self
    }

    pub fn with_username_override(mut self, enabled: bool) -> Self {
        self.enable_post_username_override = enabled;
        self
    }

    pub fn with_translation(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(id.into(), text.into());
        self
    }

    pub fn set_active_channel(&mut self, channel_id: Option<String>) {
        self.active_channel_id = channel_id;
    }
}

impl NotificationContext for StaticContext {
    fn current_user(&self) -> Option<UserProfile> {
        self.current_user.clone()
    }

    fn profile(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.get(user_id).cloned()
    }

    fn channel(&self, channel_id: &str) -> Option<Channel> {
        self.channels.get(channel_id).cloned()
    }

    fn my_member(&self, channel_id: &str) -> Option<ChannelMember> {
        self.members.get(channel_id).cloned()
    }

    fn active_channel_id(&self) -> Option<String> {
        self.active_channel_id.clone()
    }

    fn group_channel_name(&self, channel_id: &str) -> String {
        let current_id = self.current_user.as_ref().map(|u| u.id.as_str());
        let mut names: Vec<&str> = self
            .channel_members
            .get(channel_id)
            .map(|ids| {
                ids.iter()
                    .filter(|id| Some(id.as_str()) != current_id)
                    .filter_map(|id| self.profiles.get(id))
                    .map(|p| p.username.as_str())
                    .collect()
            })
            .unwrap_or_default();
        names.sort_unstable();
        names.join(", ")
    }

    fn client_variant(&self) -> Option<ClientVariant> {
        self.client_variant
    }

    fn username_override_enabled(&self) -> bool {
        self.enable_post_username_override
    }

    fn localize(&self, id: &str, default: &str) -> String {
        self.translations
            .get(id)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

fn lenient_level<'de, D>(deserializer: D) -> Result<NotifyLevel, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_level(deserializer)?.unwrap_or_default())
}

fn lenient_opt_level<'de, D>(deserializer: D) -> Result<Option<NotifyLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|s| s.parse().ok()))
}

fn lenient_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => Some(b),
        serde_json::Value::String(s) => match s.to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn lenient_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
