use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use siliconedge_api::config::{ServerConfig, StorageBackend, StoreBackend};
use siliconedge_api::local_settings::LocalSettings;
use siliconedge_api::router::build_app_router;
use siliconedge_api::state::AppState;
use siliconedge_db::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use siliconedge_events::{EventBus, InboxNotifier};
use siliconedge_storage::{LocalObjectStorage, ObjectStorage, S3ObjectStorage};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "siliconedge_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Configuration loaded");

    // --- Document store ---
    let store: Arc<dyn DocumentStore> = match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = siliconedge_db::create_pool(database_url).await?;
            siliconedge_db::health_check(&pool).await?;
            siliconedge_db::run_migrations(&pool).await?;
            tracing::info!("Postgres document store ready");

            Arc::new(PgDocumentStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory document store; data is lost on restart");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    // --- Object storage ---
    let storage: Arc<dyn ObjectStorage> = match &config.storage {
        StorageBackend::Local {
            dir,
            public_base_url,
        } => {
            tokio::fs::create_dir_all(dir).await?;
            tracing::info!(dir = %dir.display(), "Using local object storage");
            Arc::new(LocalObjectStorage::new(dir, public_base_url))
        }
        StorageBackend::S3(settings) => {
            tracing::info!(bucket = %settings.bucket, "Using S3 object storage");
            Arc::new(S3ObjectStorage::connect(settings.clone()).await)
        }
    };

    // --- Local settings ---
    let settings = Arc::new(LocalSettings::new(&config.layout_settings_path));

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let cancel = CancellationToken::new();
    let notifier_handle = match InboxNotifier::from_env() {
        Some(notifier) => Some(tokio::spawn(
            notifier.run(event_bus.subscribe(), cancel.clone()),
        )),
        None => {
            tracing::info!("SMTP_HOST or INBOX_EMAIL not set, inbox emails disabled");
            None
        }
    };

    // --- App state and router ---
    let state = AppState {
        store,
        storage,
        settings,
        event_bus: Arc::clone(&event_bus),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server drained");

    cancel.cancel();
    if let Some(handle) = notifier_handle {
        let limit = Duration::from_secs(config.shutdown_timeout_secs);
        if tokio::time::timeout(limit, handle).await.is_err() {
            tracing::warn!("Inbox notifier did not stop in time");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("SIGINT received, shutting down");
        }
        () = terminate => {
            tracing::info!("SIGTERM received, shutting down");
        }
    }
}
