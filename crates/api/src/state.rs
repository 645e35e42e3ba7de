use std::sync::Arc;
use std::time::Duration;

use siliconedge_db::DocumentStore;
use siliconedge_events::EventBus;
use siliconedge_storage::ObjectStorage;

use crate::config::ServerConfig;
use crate::local_settings::LocalSettings;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Document store holding every collection.
    pub store: Arc<dyn DocumentStore>,
    /// Object storage for uploaded files.
    pub storage: Arc<dyn ObjectStorage>,
    /// Installation-local settings (layout).
    pub settings: Arc<LocalSettings>,
    pub event_bus: Arc<EventBus>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Deadline applied to each store write.
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.config.write_timeout_secs)
    }
}
