//! Route definitions for vacancies.

use axum::routing::get;
use axum::Router;

use crate::handlers::vacancies;
use crate::state::AppState;

/// Public routes mounted at `/vacancies`.
///
/// ```text
/// GET /      -> list_vacancies (?q=)
/// GET /{id}  -> get_vacancy
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(vacancies::list_vacancies))
        .route("/{id}", get(vacancies::get_vacancy))
}

/// Admin routes mounted at `/admin/vacancies`.
///
/// ```text
/// GET    /      -> admin_list_vacancies (?q=)
/// POST   /      -> create_vacancy
/// GET    /{id}  -> admin_get_vacancy
/// PUT    /{id}  -> update_vacancy
/// DELETE /{id}  -> delete_vacancy (?confirm=true)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(vacancies::admin_list_vacancies).post(vacancies::create_vacancy),
        )
        .route(
            "/{id}",
            get(vacancies::admin_get_vacancy)
                .put(vacancies::update_vacancy)
                .delete(vacancies::delete_vacancy),
        )
}
