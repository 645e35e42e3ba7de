use std::path::PathBuf;
use std::str::FromStr;

use siliconedge_storage::S3Settings;

use crate::auth::jwt::JwtConfig;

/// A required or malformed environment variable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Where documents are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Postgres JSONB documents; requires `DATABASE_URL`.
    Postgres { database_url: String },
    /// Process memory; contents are lost on restart.
    Memory,
}

/// Where uploaded files are kept.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Files under `dir`, served by this server at `/files`.
    Local { dir: PathBuf, public_base_url: String },
    S3(S3Settings),
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Limit on a single store write before the client gets 504.
    pub write_timeout_secs: u64,
    /// How long to wait for background tasks on shutdown.
    pub shutdown_timeout_secs: u64,
    pub store: StoreBackend,
    pub storage: StorageBackend,
    /// JSON file holding local (per-installation) settings such as the layout.
    pub layout_settings_path: PathBuf,
    /// Whether `POST /auth/register` creates accounts.
    pub allow_registration: bool,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `HOST`                    | `0.0.0.0`                   |
    /// | `PORT`                    | `3000`                      |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                        |
    /// | `WRITE_TIMEOUT_SECS`      | `10`                        |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                        |
    /// | `STORE_BACKEND`           | `postgres` (or `memory`)    |
    /// | `DATABASE_URL`            | required for `postgres`     |
    /// | `STORAGE_BACKEND`         | `local` (or `s3`)           |
    /// | `STORAGE_LOCAL_DIR`       | `./uploads`                 |
    /// | `STORAGE_PUBLIC_BASE_URL` | `/files` for `local`        |
    /// | `S3_BUCKET`               | required for `s3`           |
    /// | `S3_REGION`               | `us-east-1`                 |
    /// | `S3_ENDPOINT`             | -                           |
    /// | `LAYOUT_SETTINGS_PATH`    | `./data/local-settings.json`|
    /// | `ALLOW_REGISTRATION`      | `true`                      |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = var_or("HOST", "0.0.0.0");
        let port = parse_var("PORT", "3000")?;

        let cors_origins: Vec<String> = var_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.parse::<axum::http::HeaderValue>().is_err())
        {
            return Err(invalid("CORS_ORIGINS", bad, "not a valid header value"));
        }

        let request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", "30")?;
        let write_timeout_secs = parse_var("WRITE_TIMEOUT_SECS", "10")?;
        let shutdown_timeout_secs = parse_var("SHUTDOWN_TIMEOUT_SECS", "30")?;

        let store = match var_or("STORE_BACKEND", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            },
            "memory" => StoreBackend::Memory,
            other => return Err(invalid("STORE_BACKEND", other, "expected postgres or memory")),
        };

        let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL").ok();
        let storage = match var_or("STORAGE_BACKEND", "local").as_str() {
            "local" => StorageBackend::Local {
                dir: PathBuf::from(var_or("STORAGE_LOCAL_DIR", "./uploads")),
                public_base_url: public_base_url.unwrap_or_else(|| "/files".into()),
            },
            "s3" => StorageBackend::S3(S3Settings {
                bucket: std::env::var("S3_BUCKET").map_err(|_| ConfigError::Missing("S3_BUCKET"))?,
                region: var_or("S3_REGION", "us-east-1"),
                endpoint: std::env::var("S3_ENDPOINT").ok(),
                public_base_url,
            }),
            other => return Err(invalid("STORAGE_BACKEND", other, "expected local or s3")),
        };

        let layout_settings_path =
            PathBuf::from(var_or("LAYOUT_SETTINGS_PATH", "./data/local-settings.json"));
        let allow_registration = parse_var("ALLOW_REGISTRATION", "true")?;

        let jwt = JwtConfig::from_env()?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            write_timeout_secs,
            shutdown_timeout_secs,
            store,
            storage,
            layout_settings_path,
            allow_registration,
            jwt,
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn parse_var<T>(name: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = var_or(name, default);
    raw.parse()
        .map_err(|e: T::Err| invalid(name, &raw, &e.to_string()))
}

fn invalid(name: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
