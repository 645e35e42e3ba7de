//! Inbox notification service.
//!
//! [`InboxNotifier`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and emails every [`SiteEvent`] to the company inbox. Delivery failures
//! are logged and never reach the visitor whose submission triggered them.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::bus::SiteEvent;
use crate::delivery::email::{EmailConfig, EmailDelivery, EventMailer};

/// Background service forwarding site events to one inbox address.
pub struct InboxNotifier {
    mailer: Arc<dyn EventMailer>,
    inbox: String,
}

impl InboxNotifier {
    pub fn new(mailer: Arc<dyn EventMailer>, inbox: impl Into<String>) -> Self {
        Self {
            mailer,
            inbox: inbox.into(),
        }
    }

    /// SMTP-backed notifier, or `None` unless both `SMTP_HOST` and
    /// `INBOX_EMAIL` are set.
    pub fn from_env() -> Option<Self> {
        let config = EmailConfig::from_env()?;
        let inbox = std::env::var("INBOX_EMAIL").ok()?;
        Some(Self::new(Arc::new(EmailDelivery::new(config)), inbox))
    }

    /// Run until `cancel` fires or the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<SiteEvent>, cancel: CancellationToken) {
        tracing::info!(inbox = %self.inbox, "Inbox notifier started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Inbox notifier stopping");
                    break;
                }
                received = receiver.recv() => match received {
                    Ok(event) => self.forward(&event).await,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Inbox notifier lagged, some events were not emailed");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, inbox notifier shutting down");
                        break;
                    }
                },
            }
        }
    }

    async fn forward(&self, event: &SiteEvent) {
        if let Err(e) = self.mailer.deliver(&self.inbox, event).await {
            tracing::error!(
                error = %e,
                event_type = %event.event_type,
                "Failed to email site event"
            );
        }
    }
}
