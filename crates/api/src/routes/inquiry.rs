//! Route definitions for contact messages.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::inquiries;
use crate::state::AppState;

/// `POST /contact`, merged at the API root.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/contact", post(inquiries::submit_contact))
}

/// Admin routes mounted at `/admin/inquiries`.
///
/// ```text
/// GET    /      -> list_inquiries (?processed=)
/// PATCH  /{id}  -> update_inquiry
/// DELETE /{id}  -> delete_inquiry (?confirm=true)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(inquiries::list_inquiries))
        .route(
            "/{id}",
            patch(inquiries::update_inquiry).delete(inquiries::delete_inquiry),
        )
}
