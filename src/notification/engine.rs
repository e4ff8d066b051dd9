//! Eligibility engine - decides whether a message becomes a desktop alert
//!
//! Checks run in a fixed order and stop at the first one that suppresses:
//! author, system message, notify level, mention, then focus. Text is only
//! composed once every check has passed.

use tracing::{debug, info};

use super::alert::{AlertRequest, Decision, SuppressReason, DEFAULT_NOTIFICATION_DURATION_MS};
use super::composer::MessageComposer;
use super::context::{NotificationContext, NotifyProps};
use super::event::{ChannelType, MessageEvent, TransportMetadata};
use super::focus::FocusTracker;
use super::mention::{is_mentioned, parse_mentions};
use super::preference::{self, NotifyLevel};

/// Eligibility engine; the only state it carries is window focus
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    focus: FocusTracker,
    default_duration_ms: u64,
}

impl EligibilityEngine {
    pub fn new() -> Self {
        Self {
            focus: FocusTracker::new(),
            default_duration_ms: DEFAULT_NOTIFICATION_DURATION_MS,
        }
    }

    /// Duration used when the user has no desktop duration configured
    pub fn with_default_duration_ms(mut self, duration_ms: u64) -> Self {
        self.default_duration_ms = duration_ms;
        self
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focus.set(focused);
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        debug!(focused, "Window focus changed");
        self.focus.set(focused);
    }

    pub fn focus(&self) -> bool {
        self.focus.get()
    }

    /// Evaluate a message and return the alert to raise, if any
    pub fn handle_message(
        &self,
        event: &MessageEvent,
        props: &TransportMetadata,
        ctx: &dyn NotificationContext,
    ) -> Option<AlertRequest> {
        self.evaluate(event, props, ctx).into_alert()
    }

    /// Evaluate a message, keeping the suppression reason
    pub fn evaluate(
        &self,
        event: &MessageEvent,
        props: &TransportMetadata,
        ctx: &dyn NotificationContext,
    ) -> Decision {
        let decision = self.decide(event, props, ctx);
        match &decision {
            Decision::Alert(alert) => info!(
                channel_id = %alert.channel_id,
                team_id = %alert.team_id,
                duration_ms = alert.duration_ms,
                play_sound = alert.play_sound,
                "Desktop alert raised"
            ),
            Decision::Suppressed { reason } => debug!(
                channel_id = %event.channel_id,
                author = %event.user_id,
                reason = %reason,
                "Desktop alert suppressed"
            ),
        }
        decision
    }

    fn decide(
        &self,
        event: &MessageEvent,
        props: &TransportMetadata,
        ctx: &dyn NotificationContext,
    ) -> Decision {
        let Some(user) = ctx.current_user() else {
            return suppressed(SuppressReason::NoCurrentUser);
        };

        // Own webhook posts still notify; automation may be acting as the user
        if event.user_id == user.id && !event.is_from_webhook() {
            return suppressed(SuppressReason::OwnMessage);
        }

        if event.is_system_message() {
            return suppressed(SuppressReason::SystemMessage);
        }

        let channel = ctx.channel(&event.channel_id);
        let channel_override = ctx
            .my_member(&event.channel_id)
            .and_then(|member| member.notify_props.desktop);
        let level = preference::resolve(user.notify_props.desktop, channel_override);

        match level {
            NotifyLevel::None => return suppressed(SuppressReason::LevelNone),
            NotifyLevel::Mention => {
                let channel_type = props
                    .channel_type
                    .or_else(|| channel.as_ref().map(|c| c.channel_type));
                let mentions = parse_mentions(props.mentions.as_deref());
                if !is_mentioned(&mentions, &user.id) && channel_type != Some(ChannelType::Direct) {
                    return suppressed(SuppressReason::NotMentioned);
                }
            }
            NotifyLevel::All | NotifyLevel::Default => {}
        }

        // Independent of the text, so checked before composing
        let viewing = ctx.active_channel_id().as_deref() == Some(event.channel_id.as_str());
        if viewing && self.focus.get() {
            return suppressed(SuppressReason::ViewingChannel);
        }

        let composer = MessageComposer::new(ctx);
        let sender = composer.sender_name(event, props);
        let composed = composer.compose(event, props, channel.as_ref(), &sender);

        let sound = sound_enabled(&user.notify_props);
        let play_sound = sound
            && !ctx
                .client_variant()
                .map(|variant| variant.provides_own_sound())
                .unwrap_or(false);

        Decision::Alert(AlertRequest {
            title: composed.title,
            body: composed.body,
            channel_id: event.channel_id.clone(),
            channel_name: channel
                .map(|c| c.name)
                .filter(|name| !name.is_empty())
                .or_else(|| props.channel_name.clone()),
            team_id: props.team_id.clone(),
            duration_ms: self.duration_ms(&user.notify_props),
            suppress_sound: !sound,
            play_sound,
        })
    }

    fn duration_ms(&self, notify_props: &NotifyProps) -> u64 {
        match notify_props.desktop_duration {
            Some(secs) => secs.saturating_mul(1000),
            None => self.default_duration_ms,
        }
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Sound stays on unless the user explicitly turned it off
fn sound_enabled(notify_props: &NotifyProps) -> bool {
    notify_props.desktop_sound != Some(false)
}

fn suppressed(reason: SuppressReason) -> Decision {
    Decision::Suppressed { reason }
}
