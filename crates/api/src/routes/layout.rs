//! Route definitions for layout settings.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::layout;
use crate::state::AppState;

/// `GET /layout`, merged at the API root.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/layout", get(layout::get_layout))
}

/// Admin routes mounted at `/admin/layout`.
///
/// ```text
/// PUT  /       -> put_layout
/// POST /reset  -> reset_layout
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", put(layout::put_layout))
        .route("/reset", post(layout::reset_layout))
}
