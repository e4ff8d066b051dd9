//! Notification service - a single loop that owns the engine
//!
//! Inbound events arrive over an mpsc channel and are handled one at a time,
//! so focus changes and messages are applied in the order they were sent.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::alert::AlertRequest;
use super::context::NotificationContext;
use super::dispatcher::AlertDispatcher;
use super::engine::EligibilityEngine;
use super::event::InboundEvent;

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceStats {
    pub messages: usize,
    pub focus_changes: usize,
    pub alerts: usize,
}

/// Owns one engine, its collaborators and the alert dispatcher
pub struct NotificationService {
    engine: EligibilityEngine,
    ctx: Box<dyn NotificationContext>,
    dispatcher: AlertDispatcher,
    stats: ServiceStats,
}

impl NotificationService {
    pub fn new(
        engine: EligibilityEngine,
        ctx: Box<dyn NotificationContext>,
        dispatcher: AlertDispatcher,
    ) -> Self {
        Self {
            engine,
            ctx,
            dispatcher,
            stats: ServiceStats::default(),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats
    }

    /// Handle one event to completion; returns the alert that was dispatched
    pub fn handle(&mut self, event: InboundEvent) -> Option<AlertRequest> {
        match event {
            InboundEvent::FocusChanged { focused } => {
                self.stats.focus_changes += 1;
                self.engine.set_focus(focused);
                None
            }
            InboundEvent::MessageReceived { post, props } => {
                self.stats.messages += 1;
                let alert = self.engine.handle_message(&post, &props, self.ctx.as_ref())?;
                self.dispatcher.dispatch(&alert);
                self.stats.alerts += 1;
                Some(alert)
            }
        }
    }

    /// Consume events until every sender is dropped
    pub async fn run(mut self, mut rx: mpsc::Receiver<InboundEvent>) -> ServiceStats {
        info!(channels = ?self.dispatcher.channel_names(), "Notification service started");
        while let Some(event) = rx.recv().await {
            self.handle(event);
        }
        debug!(stats = ?self.stats, "Event channel closed");
        info!(
            messages = self.stats.messages,
            alerts = self.stats.alerts,
            "Notification service stopped"
        );
        self.stats
    }

    /// Spawn the loop on the current runtime
    pub fn spawn(self, buffer: usize) -> (mpsc::Sender<InboundEvent>, JoinHandle<ServiceStats>) {
        let (tx, rx) = mpsc::channel(buffer);
        let handle = tokio::spawn(self.run(rx));
        (tx, handle)
    }
}
