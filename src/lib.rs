//! Desktop Notify - decide whether chat messages should raise a desktop notification

pub mod cli;
pub mod config;
pub mod notification;

pub use config::{ChannelKind, EngineConfig};
pub use notification::{
    AlertDispatcher, AlertRequest, ChannelType, Decision, DispatcherBuilder, EligibilityEngine,
    InboundEvent, MessageEvent, NotificationContext, NotificationService, NotifyLevel,
    StaticContext, SuppressReason, TransportMetadata,
};
