use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use super::application::MULTIPART_BODY_LIMIT;
use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/admin/uploads`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        post(uploads::upload_file).layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT)),
    )
}
