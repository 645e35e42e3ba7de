//! Route definitions for case studies.

use axum::routing::get;
use axum::Router;

use crate::handlers::case_studies;
use crate::state::AppState;

/// Public routes mounted at `/case-studies`.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(case_studies::list_case_studies))
        .route("/{id}", get(case_studies::get_case_study))
}

/// Admin routes mounted at `/admin/case-studies`.
///
/// ```text
/// GET    /      -> admin_list_case_studies (?q=)
/// POST   /      -> create_case_study
/// GET    /{id}  -> admin_get_case_study
/// PUT    /{id}  -> update_case_study
/// DELETE /{id}  -> delete_case_study (?confirm=true)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(case_studies::admin_list_case_studies).post(case_studies::create_case_study),
        )
        .route(
            "/{id}",
            get(case_studies::admin_get_case_study)
                .put(case_studies::update_case_study)
                .delete(case_studies::delete_case_study),
        )
}
