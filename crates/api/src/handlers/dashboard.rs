//! Admin dashboard summary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use siliconedge_db::repositories::{ApplicationRepo, CaseStudyRepo, ContactRepo, VacancyRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InboxCounts {
    pub total: i64,
    pub unprocessed: i64,
}

/// Collection counts shown on the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub vacancies: i64,
    pub case_studies: i64,
    pub applications: InboxCounts,
    pub inquiries: InboxCounts,
}

/// GET /api/v1/admin/dashboard
pub async fn summary(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let store = state.store.as_ref();
    let (vacancies, case_studies) =
        tokio::try_join!(VacancyRepo::count(store), CaseStudyRepo::count(store))?;
    let (applications, unprocessed_applications) = tokio::try_join!(
        ApplicationRepo::count(store),
        ApplicationRepo::count_unprocessed(store),
    )?;
    let (inquiries, unprocessed_inquiries) = tokio::try_join!(
        ContactRepo::count(store),
        ContactRepo::count_unprocessed(store),
    )?;

    Ok(Json(DataResponse {
        data: DashboardSummary {
            vacancies,
            case_studies,
            applications: InboxCounts {
                total: applications,
                unprocessed: unprocessed_applications,
            },
            inquiries: InboxCounts {
                total: inquiries,
                unprocessed: unprocessed_inquiries,
            },
        },
    }))
}
