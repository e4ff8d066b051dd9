//! State snapshot loading and event replay

use desktop_notify::cli::load_state;
use desktop_notify::notification::{
    AlertDispatcher, ClientVariant, EligibilityEngine, InboundEvent, NotificationContext,
    NotificationService, NotifyLevel,
};
use std::fs;
use tempfile::TempDir;

const STATE: &str = r#"{
    "current_user": {
        "id": "u1",
        "username": "me",
        "notify_props": {"desktop": "mention", "desktop_sound": "true", "desktop_duration": "3"}
    },
    "profiles": {
        "u2": {"id": "u2", "username": "alice"}
    },
    "channels": {
        "c1": {"id": "c1", "name": "town-square", "display_name": "Town Square", "type": "O"},
        "c2": {"id": "c2", "name": "random", "display_name": "Random", "type": "O"}
    },
    "members": {
        "c2": {"channel_id": "c2", "user_id": "u1", "notify_props": {"desktop": "all"}}
    },
    "active_channel_id": "c1",
    "client_variant": "platform-native",
    "enable_post_username_override": true
}"#;

fn write_state(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("state.json");
    fs::write(&path, STATE).unwrap();
    path
}

#[test]
fn test_load_state_snapshot() {
    let dir = TempDir::new().unwrap();
    let ctx = load_state(&write_state(&dir)).unwrap();

    let user = ctx.current_user().unwrap();
    assert_eq!(user.notify_props.desktop, NotifyLevel::Mention);
    assert_eq!(ctx.client_variant(), Some(ClientVariant::PlatformNative));
    assert!(ctx.username_override_enabled());
    assert_eq!(ctx.active_channel_id().as_deref(), Some("c1"));
}

#[test]
fn test_load_state_reports_bad_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "[]").unwrap();
    let err = load_state(&path).unwrap_err();
    assert!(err.to_string().contains("invalid state"));
}

#[test]
fn test_event_stream_against_snapshot() {
    let dir = TempDir::new().unwrap();
    let ctx = load_state(&write_state(&dir)).unwrap();
    let mut service = NotificationService::new(
        EligibilityEngine::new(),
        Box::new(ctx),
        AlertDispatcher::new(),
    );

    let lines = [
        // mention-only by default: not mentioned in c1
        r#"{"type": "message_received", "post": {"user_id": "u2", "channel_id": "c1", "message": "hi"}, "props": {"team_id": "t1"}}"#,
        // c2 overrides to all; override username honored by policy
        r#"{"type": "message_received", "post": {"user_id": "u2", "channel_id": "c2", "message": "hi", "props": {"override_username": "ci-bot"}}, "props": {"team_id": "t1", "sender_name": "alice"}}"#,
        r#"{"type": "focus_changed", "focused": true}"#,
        // mentioned, but c1 is active and focused
        r#"{"type": "message_received", "post": {"user_id": "u2", "channel_id": "c1", "message": "@me"}, "props": {"team_id": "t1", "mentions": "[\"u1\"]"}}"#,
    ];

    let alerts: Vec<_> = lines
        .iter()
        .map(|line| serde_json::from_str::<InboundEvent>(line).unwrap())
        .filter_map(|event| service.handle(event))
        .collect();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].title, "Random");
    assert_eq!(alerts[0].body, "ci-bot wrote: hi");
    assert_eq!(alerts[0].duration_ms, 3000);
    assert!(!alerts[0].suppress_sound);
    // platform-native client plays its own sound
    assert!(!alerts[0].play_sound);
}
