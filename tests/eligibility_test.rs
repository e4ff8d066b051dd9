//! Eligibility rules, end to end

use desktop_notify::notification::{
    Channel, ChannelType, EligibilityEngine, MessageEvent, NotifyLevel, NotifyProps,
    StaticContext, SuppressReason, TransportMetadata, UserProfile,
};

fn user(level: NotifyLevel) -> UserProfile {
    UserProfile::new("u1", "me").with_notify_props(NotifyProps {
        desktop: level,
        ..Default::default()
    })
}

fn ctx(level: NotifyLevel, active: &str) -> StaticContext {
    StaticContext::new()
        .with_current_user(user(level))
        .with_profile(UserProfile::new("u2", "alice"))
        .with_channel(Channel::new("c1", "Town Square", ChannelType::Standard))
        .with_channel(Channel::new("g1", "", ChannelType::Group))
        .with_channel(Channel::new("d1", "u1__u2", ChannelType::Direct))
        .with_active_channel(active)
}

#[test]
fn test_scenario_alert_when_viewing_other_channel() {
    let ctx = ctx(NotifyLevel::All, "c2");
    let engine = EligibilityEngine::new().with_focus(true);
    let event = MessageEvent::new("u2", "c1", "hi\n\nthere");
    let props = TransportMetadata::new("t1").with_mentions("[]");

    let alert = engine.handle_message(&event, &props, &ctx).expect("should alert");
    assert_eq!(alert.body, "alice wrote: hi there");
    assert_eq!(alert.title, "Town Square");
}

#[test]
fn test_scenario_suppressed_when_viewing_same_channel() {
    let ctx = ctx(NotifyLevel::All, "c1");
    let engine = EligibilityEngine::new().with_focus(true);
    let event = MessageEvent::new("u2", "c1", "hi\n\nthere");
    let props = TransportMetadata::new("t1").with_mentions("[]");

    assert!(engine.handle_message(&event, &props, &ctx).is_none());
}

#[test]
fn test_scenario_mention_on_standard_channel() {
    let ctx = ctx(NotifyLevel::Mention, "c2");
    let engine = EligibilityEngine::new();
    let event = MessageEvent::new("u2", "c1", "@me can you look");
    let props = TransportMetadata::new("t1")
        .with_mentions(r#"["u1"]"#)
        .with_channel_type(ChannelType::Standard);

    assert!(engine.handle_message(&event, &props, &ctx).is_some());
}

#[test]
fn test_scenario_image_upload_body() {
    let ctx = ctx(NotifyLevel::All, "c2");
    let engine = EligibilityEngine::new();
    let event = MessageEvent::new("u2", "c1", "");
    let props = TransportMetadata::new("t1").with_image();

    let alert = engine.handle_message(&event, &props, &ctx).unwrap();
    assert_eq!(alert.body, "alice uploaded an image");
}

#[test]
fn test_own_typed_messages_never_alert() {
    let engine = EligibilityEngine::new();
    for level in [NotifyLevel::Default, NotifyLevel::All, NotifyLevel::Mention, NotifyLevel::None] {
        for channel in ["c1", "g1", "d1", "unknown"] {
            let ctx = ctx(level, "elsewhere");
            let event = MessageEvent::new("u1", channel, "mine");
            let props = TransportMetadata::new("t1").with_mentions(r#"["u1"]"#);
            let decision = engine.evaluate(&event, &props, &ctx);
            assert_eq!(decision.reason(), Some(SuppressReason::OwnMessage));
        }
    }
}

#[test]
fn test_level_none_never_alerts() {
    let engine = EligibilityEngine::new();
    let ctx = ctx(NotifyLevel::None, "elsewhere");
    for mentions in [None, Some("[]"), Some(r#"["u1"]"#), Some("garbage")] {
        for channel in ["c1", "g1", "d1"] {
            let event = MessageEvent::new("u2", channel, "ping");
            let props = TransportMetadata {
                mentions: mentions.map(str::to_string),
                ..TransportMetadata::new("t1")
            };
            assert!(engine.handle_message(&event, &props, &ctx).is_none());
        }
    }
}

#[test]
fn test_mention_level_requires_mention_outside_direct() {
    let engine = EligibilityEngine::new();
    let ctx = ctx(NotifyLevel::Mention, "elsewhere");
    for channel in ["c1", "g1"] {
        for mentions in [None, Some("[]"), Some(r#"["u3"]"#), Some("{bad")] {
            let event = MessageEvent::new("u2", channel, "ping");
            let props = TransportMetadata {
                mentions: mentions.map(str::to_string),
                ..TransportMetadata::new("t1")
            };
            assert_eq!(
                engine.evaluate(&event, &props, &ctx).reason(),
                Some(SuppressReason::NotMentioned)
            );
        }
    }

    let dm = MessageEvent::new("u2", "d1", "ping");
    assert!(engine.handle_message(&dm, &TransportMetadata::new("t1"), &ctx).is_some());
}

#[test]
fn test_truncated_body_keeps_49_chars() {
    let ctx = ctx(NotifyLevel::All, "elsewhere");
    let engine = EligibilityEngine::new();
    let prefix = "alice wrote: ";

    for len in [51, 60, 200] {
        let text: String = "abcdefghij".chars().cycle().take(len).collect();
        let event = MessageEvent::new("u2", "c1", text.clone());
        let alert = engine.handle_message(&event, &TransportMetadata::new("t1"), &ctx).unwrap();

        let visible = alert.body.strip_prefix(prefix).unwrap();
        let visible = visible.strip_suffix("...").unwrap();
        assert_eq!(visible.chars().count(), 49);
        assert!(text.starts_with(visible));
    }
}

#[test]
fn test_group_channel_title() {
    let ctx = ctx(NotifyLevel::All, "elsewhere")
        .with_profile(UserProfile::new("u3", "bob"))
        .with_channel_members("g1", vec!["u1".into(), "u2".into(), "u3".into()]);
    let engine = EligibilityEngine::new();
    let event = MessageEvent::new("u2", "g1", "lunch?");
    let alert = engine.handle_message(&event, &TransportMetadata::new("t1"), &ctx).unwrap();
    assert_eq!(alert.title, "alice, bob");
}
