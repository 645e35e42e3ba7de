//! Handler error type and its JSON rendering.
//!
//! Every failure leaves the API as `{"error": <message>, "code": <CODE>}`.
//! Backend failures are logged here and reach the client only as a generic
//! message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use siliconedge_core::error::CoreError;
use siliconedge_db::StoreError;
use siliconedge_storage::StorageError;

use crate::local_settings::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A store write outlived the write timeout. It may still land later.
    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

type Rendered = (StatusCode, &'static str, String);

fn core_parts(err: &CoreError) -> Rendered {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => hidden("core", msg),
    }
}

/// Log `detail` and answer with the generic 500 body.
fn hidden(source: &str, detail: &dyn std::fmt::Display) -> Rendered {
    tracing::error!(source, error = %detail, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_owned(),
    )
}

impl AppError {
    fn parts(&self) -> Rendered {
        match self {
            AppError::Core(err) => core_parts(err),
            AppError::Store(err) => hidden("store", err),
            AppError::Settings(err) => hidden("settings", err),
            AppError::InternalError(msg) => hidden("handler", msg),
            AppError::Storage(StorageError::InvalidKey(key)) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                format!("Invalid object key '{key}'"),
            ),
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Object storage failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "STORAGE_ERROR",
                    "File storage is unavailable".to_owned(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Timeout(msg) => {
                tracing::warn!(error = %msg, "Store write timed out");
                (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_names_entity_and_id() {
        let (status, body) = render(CoreError::not_found("Vacancy", "v1").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["error"], "Vacancy with id v1 not found");
    }

    #[tokio::test]
    async fn store_errors_do_not_leak_details() {
        let err = StoreError::Unavailable("connection refused to 10.0.0.5".into());
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn timeout_maps_to_504() {
        let (status, body) = render(AppError::Timeout("Write took too long".into())).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["code"], "TIMEOUT");
    }
}
