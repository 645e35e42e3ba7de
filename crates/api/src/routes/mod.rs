pub mod application;
pub mod auth;
pub mod case_study;
pub mod dashboard;
pub mod health;
pub mod inquiry;
pub mod layout;
pub mod site;
pub mod upload;
pub mod vacancy;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /site/routes                       route table (public)
/// /site/routes/resolve?path=         resolve one path (public)
/// /site/pages/{slug}                 static page copy (public)
/// /site/expertise                    expertise areas (public)
/// /site/intro                        intro loader schedule (public)
/// /search?q=                         header search (public)
///
/// /vacancies                         list (public)
/// /vacancies/{id}                    get (public)
/// /case-studies                      list (public)
/// /case-studies/{id}                 get (public)
/// /contact                           submit message (public, POST)
/// /applications                      submit application (public, multipart POST)
/// /layout                            layout settings (public)
///
/// /auth/register                     register (public, if enabled)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current admin (requires auth)
/// /auth/profile                      update profile (requires auth, PUT)
/// /auth/password                     change password (requires auth, PUT)
///
/// /admin/dashboard                   counts (admin only)
/// /admin/vacancies                   list, create
/// /admin/vacancies/{id}              get, update, delete (?confirm=true)
/// /admin/case-studies                list, create
/// /admin/case-studies/{id}           get, update, delete (?confirm=true)
/// /admin/applications?processed=     list
/// /admin/applications/{id}           mark processed, delete (?confirm=true)
/// /admin/inquiries?processed=        list
/// /admin/inquiries/{id}              mark processed, delete (?confirm=true)
/// /admin/uploads                     upload a file (multipart POST)
/// /admin/layout                      save layout (PUT)
/// /admin/layout/reset                restore defaults (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Static site data.
        .nest("/site", site::router())
        .merge(site::search_router())
        // Public content and submissions.
        .nest("/vacancies", vacancy::public_router())
        .nest("/case-studies", case_study::public_router())
        .merge(inquiry::public_router())
        .merge(application::public_router())
        .merge(layout::public_router())
        // Auth.
        .nest("/auth", auth::router())
        // Admin panel.
        .nest("/admin/dashboard", dashboard::router())
        .nest("/admin/vacancies", vacancy::admin_router())
        .nest("/admin/case-studies", case_study::admin_router())
        .nest("/admin/applications", application::admin_router())
        .nest("/admin/inquiries", inquiry::admin_router())
        .nest("/admin/uploads", upload::router())
        .nest("/admin/layout", layout::admin_router())
}
