#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use siliconedge_api::auth::jwt::JwtConfig;
use siliconedge_api::auth::password::hash_password;
use siliconedge_api::config::{ServerConfig, StorageBackend, StoreBackend};
use siliconedge_api::local_settings::LocalSettings;
use siliconedge_api::router::build_app_router;
use siliconedge_api::state::AppState;
use siliconedge_core::roles::ROLE_ADMIN;
use siliconedge_db::models::admin_user::{AdminUser, CreateAdminUser};
use siliconedge_db::repositories::AdminUserRepo;
use siliconedge_db::{Document, DocumentStore, MemoryDocumentStore, StoreError};
use siliconedge_events::EventBus;
use siliconedge_storage::LocalObjectStorage;

pub const ADMIN_EMAIL: &str = "admin@siliconedge.test";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

// ---------------------------------------------------------------------------
// Test store
// ---------------------------------------------------------------------------

/// Memory store with injectable insert failures and insert latency.
#[derive(Default)]
pub struct TestStore {
    pub inner: MemoryDocumentStore,
    fail_inserts: AtomicBool,
    insert_delay_ms: AtomicU64,
}

impl TestStore {
    pub fn fail_inserts(&self, on: bool) {
        self.fail_inserts.store(on, Ordering::SeqCst);
    }

    pub fn delay_inserts(&self, delay: Duration) {
        self.insert_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for TestStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn insert(&self, collection: &str, data: Value) -> Result<Document, StoreError> {
        let delay = self.insert_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected insert failure".into()));
        }
        self.inner.insert(collection, data).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<Document>, StoreError> {
        self.inner.update(collection, id, patch).await
    }

    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
    ) -> Result<Option<i64>, StoreError> {
        self.inner.increment(collection, id, field).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        self.inner.delete(collection, id).await
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.find_by_field(collection, field, value).await
    }

    async fn count_where(
        &self,
        collection: &str,
        filter: Option<(&str, &Value)>,
    ) -> Result<i64, StoreError> {
        self.inner.count_where(collection, filter).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// A running test application and the resources behind it.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<TestStore>,
    pub events: Arc<EventBus>,
    pub uploads: TempDir,
    pub settings_dir: TempDir,
}

impl TestApp {
    /// A fresh clone of the router for one request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Files currently stored under the upload folder `folder`.
    pub fn uploaded_files(&self, folder: &str) -> Vec<String> {
        match std::fs::read_dir(self.uploads.path().join(folder)) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(uploads: &TempDir, settings_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        write_timeout_secs: 10,
        shutdown_timeout_secs: 5,
        store: StoreBackend::Memory,
        storage: StorageBackend::Local {
            dir: uploads.path().to_path_buf(),
            public_base_url: "/files".to_string(),
        },
        layout_settings_path: settings_dir.path().join("local-settings.json"),
        allow_registration: true,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
pub fn build_test_app() -> TestApp {
    build_test_app_with(|_| {})
}

/// Like [`build_test_app`], letting the caller adjust the configuration.
pub fn build_test_app_with(configure: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let uploads = TempDir::new().expect("temp upload dir");
    let settings_dir = TempDir::new().expect("temp settings dir");
    let mut config = test_config(&uploads, &settings_dir);
    configure(&mut config);

    let store = Arc::new(TestStore::default());
    let events = Arc::new(EventBus::default());
    let state = AppState {
        store: store.clone(),
        storage: Arc::new(LocalObjectStorage::new(uploads.path(), "/files")),
        settings: Arc::new(LocalSettings::new(&config.layout_settings_path)),
        event_bus: events.clone(),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        events,
        uploads,
        settings_dir,
    }
}

// ---------------------------------------------------------------------------
// Admin accounts
// ---------------------------------------------------------------------------

/// Create an admin directly in the store.
pub async fn seed_admin(store: &dyn DocumentStore, email: &str, password: &str) -> AdminUser {
    let input = CreateAdminUser {
        email: email.to_string(),
        display_name: "Site Admin".to_string(),
        password_hash: hash_password(password).expect("hashing should succeed"),
        role: ROLE_ADMIN.to_string(),
    };
    AdminUserRepo::create(store, &input)
        .await
        .expect("admin creation should succeed")
}

/// Log in via the API and return the full auth response.
pub async fn login(app: Router, email: &str, password: &str) -> Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Seed the default admin and return an access token for it.
pub async fn admin_token(test: &TestApp) -> String {
    seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let json = login(test.app(), ADMIN_EMAIL, ADMIN_PASSWORD).await;
    json["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), None)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::DELETE, uri, Some(token), None)).await
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "siliconedge-test-boundary";

/// Builder for a `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// POST a multipart form, optionally with a bearer token.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    form: MultipartBody,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(form.finish()))
        .expect("valid request");
    send(app, request).await
}
