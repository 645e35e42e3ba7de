//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Body returned after a visitor submission is stored.
#[derive(Debug, Serialize)]
pub struct Submitted<T: Serialize> {
    pub data: T,
    /// Confirmation shown to the visitor.
    pub message: &'static str,
}
