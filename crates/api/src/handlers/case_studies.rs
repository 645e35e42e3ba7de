//! Handlers for case studies: the public listing and admin management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use siliconedge_core::error::CoreError;
use siliconedge_core::search::{filter_owned, EmptyQuery};
use siliconedge_core::validation;
use siliconedge_db::models::case_study::{CaseStudy, CreateCaseStudy, UpdateCaseStudy};
use siliconedge_db::repositories::CaseStudyRepo;

use super::{pdf_url_patch, trim_opt};
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ConfirmParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::write::with_write_timeout;

/// GET /api/v1/case-studies?q=
///
/// Filters on title and category; a blank `q` returns everything.
pub async fn list_case_studies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<CaseStudy>>>> {
    let studies = CaseStudyRepo::list(state.store.as_ref()).await?;
    let data = filter_owned(&studies, &params.q, EmptyQuery::All);
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/case-studies/{id}
pub async fn get_case_study(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<CaseStudy>>> {
    let study = CaseStudyRepo::find_by_id(state.store.as_ref(), &id)
        .await?
        .ok_or_else(|| CoreError::not_found("CaseStudy", &id))?;
    Ok(Json(DataResponse { data: study }))
}

pub async fn admin_list_case_studies(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    params: Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<CaseStudy>>>> {
    list_case_studies(state, params).await
}

pub async fn admin_get_case_study(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    id: Path<String>,
) -> AppResult<Json<DataResponse<CaseStudy>>> {
    get_case_study(state, id).await
}

/// POST /api/v1/admin/case-studies
///
/// `pdf_url` is normally the URL returned by `POST /admin/uploads`.
pub async fn create_case_study(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCaseStudy>,
) -> AppResult<(StatusCode, Json<DataResponse<CaseStudy>>)> {
    validation::case_study(&input.title, &input.category, &input.description)?;
    let input = CreateCaseStudy {
        title: input.title.trim().to_string(),
        category: input.category.trim().to_string(),
        description: input.description.trim().to_string(),
        pdf_url: trim_opt(input.pdf_url).filter(|u| !u.is_empty()),
    };

    let store = state.store.clone();
    let study = with_write_timeout(state.write_timeout(), "Saving case study", async move {
        CaseStudyRepo::create(store.as_ref(), &input).await
    })
    .await?;

    tracing::info!(case_study_id = %study.id, user_id = %admin.user_id, "Case study created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: study })))
}

/// PUT /api/v1/admin/case-studies/{id}
pub async fn update_case_study(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCaseStudy>,
) -> AppResult<Json<DataResponse<CaseStudy>>> {
    let patch = UpdateCaseStudy {
        title: trim_opt(input.title),
        category: trim_opt(input.category),
        description: trim_opt(input.description),
        pdf_url: pdf_url_patch(input.pdf_url),
    };
    if let Some(title) = &patch.title {
        validation::require_line("Title", title)?;
    }
    if let Some(category) = &patch.category {
        validation::require_line("Category", category)?;
    }
    if let Some(description) = &patch.description {
        validation::require_text("Description", description)?;
    }

    let store = state.store.clone();
    let target = id.clone();
    let updated = with_write_timeout(state.write_timeout(), "Updating case study", async move {
        CaseStudyRepo::update(store.as_ref(), &target, &patch).await
    })
    .await?
    .ok_or_else(|| CoreError::not_found("CaseStudy", &id))?;

    tracing::info!(case_study_id = %id, user_id = %admin.user_id, "Case study updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/case-studies/{id}?confirm=true
pub async fn delete_case_study(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    confirm.require("a case study")?;

    let store = state.store.clone();
    let target = id.clone();
    let deleted = with_write_timeout(state.write_timeout(), "Deleting case study", async move {
        CaseStudyRepo::delete(store.as_ref(), &target).await
    })
    .await?;

    if !deleted {
        return Err(CoreError::not_found("CaseStudy", &id).into());
    }
    tracing::info!(case_study_id = %id, user_id = %admin.user_id, "Case study deleted");
    Ok(StatusCode::NO_CONTENT)
}
