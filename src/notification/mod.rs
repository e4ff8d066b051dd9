//! Desktop notification layer - decides whether a message raises an alert
//!
//! # Parts
//! 1. `preference`: notify level, channel override over user default
//! 2. `mention`: mention list decoding and lookup
//! 3. `composer`: title and body
//! 4. `engine`: ordered checks, owns window focus
//! 5. `dispatcher` / `channels`: fire-and-forget rendering and sound
//! 6. `service`: single-consumer event loop
//!
//! # Example
//! ```ignore
//! use desktop_notify::notification::{EligibilityEngine, MessageEvent, StaticContext, TransportMetadata};
//!
//! let engine = EligibilityEngine::new();
//! let alert = engine.handle_message(&post, &TransportMetadata::new("t1"), &ctx);
//! ```

pub mod alert;
pub mod builder;
pub mod channel;
pub mod channels;
pub mod composer;
pub mod context;
pub mod dispatcher;
pub mod engine;
pub mod event;
pub mod focus;
pub mod mention;
pub mod preference;
pub mod service;
pub mod sound;

pub use alert::{AlertRequest, Decision, SuppressReason, DEFAULT_NOTIFICATION_DURATION_MS};
pub use builder::DispatcherBuilder;
pub use channel::{AlertChannel, SendResult, SoundPlayer};
pub use composer::{notify_text, ComposedMessage, MessageComposer};
pub use context::{
    Channel, ChannelMember, ChannelNotifyProps, ClientVariant, NotificationContext, NotifyProps,
    StaticContext, UserProfile,
};
pub use dispatcher::AlertDispatcher;
pub use engine::EligibilityEngine;
pub use event::{ChannelType, InboundEvent, MessageEvent, PostProps, TransportMetadata};
pub use focus::FocusTracker;
pub use mention::{is_mentioned, parse_mentions};
pub use preference::{resolve, NotifyLevel};
pub use service::{NotificationService, ServiceStats};
pub use sound::{SilentPlayer, SoundKind, TerminalBell};
