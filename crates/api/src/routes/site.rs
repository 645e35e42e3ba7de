//! Route definitions for static site data and search.

use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

/// Routes mounted at `/site`.
///
/// ```text
/// GET /routes          -> list_routes
/// GET /routes/resolve  -> resolve_route (?path=)
/// GET /pages/{slug}    -> get_page
/// GET /expertise       -> list_expertise
/// GET /intro           -> intro
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/routes", get(site::list_routes))
        .route("/routes/resolve", get(site::resolve_route))
        .route("/pages/{slug}", get(site::get_page))
        .route("/expertise", get(site::list_expertise))
        .route("/intro", get(site::intro))
}

/// `GET /search?q=`, merged at the API root.
pub fn search_router() -> Router<AppState> {
    Router::new().route("/search", get(site::search))
}
