//! Route definitions for job applications.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;
use siliconedge_core::storage::MAX_UPLOAD_BYTES;

use crate::handlers::applications;
use crate::state::AppState;

/// Body limit for multipart forms: the file cap plus room for text fields.
pub(crate) const MULTIPART_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

/// `POST /applications`, merged at the API root.
pub fn public_router() -> Router<AppState> {
    Router::new().route(
        "/applications",
        post(applications::submit_application).layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT)),
    )
}

/// Admin routes mounted at `/admin/applications`.
///
/// ```text
/// GET    /      -> list_applications (?processed=)
/// PATCH  /{id}  -> update_application
/// DELETE /{id}  -> delete_application (?confirm=true)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(applications::list_applications))
        .route(
            "/{id}",
            patch(applications::update_application).delete(applications::delete_application),
        )
}
