//! Site events and the broadcast bus that carries them.
//!
//! Handlers publish once a visitor submission is stored; the inbox notifier
//! is the usual subscriber.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use siliconedge_core::types::DocId;
use tokio::sync::broadcast;

/// A contact form message was stored.
pub const CONTACT_RECEIVED: &str = "contact.received";

/// A job application was stored.
pub const APPLICATION_RECEIVED: &str = "application.received";

/// Something a visitor did that the company should hear about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteEvent {
    /// Dot-separated event name, e.g. `"contact.received"`.
    pub event_type: String,

    /// Id of the stored document the event is about.
    pub source_id: Option<DocId>,

    /// Event-specific fields (sender, subject, job title, ...).
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl SiteEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, id: impl Into<DocId>) -> Self {
        self.source_id = Some(id.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Events buffered per subscriber before the slowest one starts lagging.
const BUFFERED_EVENTS: usize = 256;

/// Fan-out of [`SiteEvent`]s to every live subscriber.
///
/// ```rust
/// use siliconedge_events::bus::{EventBus, SiteEvent, CONTACT_RECEIVED};
///
/// let bus = EventBus::default();
/// let mut inbox = bus.subscribe();
/// bus.publish(SiteEvent::new(CONTACT_RECEIVED));
/// assert!(inbox.try_recv().is_ok());
/// ```
pub struct EventBus {
    tx: broadcast::Sender<SiteEvent>,
}

impl EventBus {
    /// A receiver that falls more than `capacity` events behind skips the
    /// oldest ones and sees `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity).0,
        }
    }

    /// Fire and forget. With nobody listening the event is discarded.
    pub fn publish(&self, event: SiteEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("Site event published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(BUFFERED_EVENTS)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
