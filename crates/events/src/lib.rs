//! SiliconEdge event bus and inbox notifications.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`SiteEvent`] -- the event envelope for visitor submissions.
//! - [`delivery`] -- SMTP email delivery.
//! - [`InboxNotifier`] -- background service that emails every submission
//!   to the company inbox.

pub mod bus;
pub mod delivery;
pub mod notifier;

pub use bus::{EventBus, SiteEvent};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError, EventMailer};
pub use notifier::InboxNotifier;
