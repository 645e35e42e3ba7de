//! Handlers for vacancies: the public Careers listing and admin management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use siliconedge_core::error::CoreError;
use siliconedge_core::search::{filter_owned, EmptyQuery};
use siliconedge_core::validation;
use siliconedge_db::models::vacancy::{CreateVacancy, UpdateVacancy, Vacancy};
use siliconedge_db::repositories::VacancyRepo;

use super::{pdf_url_patch, trim_opt};
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ConfirmParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::write::with_write_timeout;

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/vacancies?q=
///
/// Newest first; a blank `q` returns every vacancy.
pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Vacancy>>>> {
    let vacancies = VacancyRepo::list(state.store.as_ref()).await?;
    let data = filter_owned(&vacancies, &params.q, EmptyQuery::All);
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/vacancies/{id}
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Vacancy>>> {
    let vacancy = VacancyRepo::find_by_id(state.store.as_ref(), &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Vacancy", &id))?;
    Ok(Json(DataResponse { data: vacancy }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/vacancies?q=
pub async fn admin_list_vacancies(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    params: Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Vacancy>>>> {
    list_vacancies(state, params).await
}

/// GET /api/v1/admin/vacancies/{id}
pub async fn admin_get_vacancy(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    id: Path<String>,
) -> AppResult<Json<DataResponse<Vacancy>>> {
    get_vacancy(state, id).await
}

/// POST /api/v1/admin/vacancies
pub async fn create_vacancy(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateVacancy>,
) -> AppResult<(StatusCode, Json<DataResponse<Vacancy>>)> {
    validation::vacancy(
        &input.title,
        &input.experience,
        &input.location,
        &input.description,
    )?;
    let input = CreateVacancy {
        title: input.title.trim().to_string(),
        experience: input.experience.trim().to_string(),
        location: input.location.trim().to_string(),
        description: input.description.trim().to_string(),
        pdf_url: trim_opt(input.pdf_url).filter(|u| !u.is_empty()),
    };

    let store = state.store.clone();
    let vacancy = with_write_timeout(state.write_timeout(), "Saving vacancy", async move {
        VacancyRepo::create(store.as_ref(), &input).await
    })
    .await?;

    tracing::info!(vacancy_id = %vacancy.id, user_id = %admin.user_id, "Vacancy created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: vacancy })))
}

/// PUT /api/v1/admin/vacancies/{id}
///
/// Only the provided fields change.
pub async fn update_vacancy(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateVacancy>,
) -> AppResult<Json<DataResponse<Vacancy>>> {
    let patch = UpdateVacancy {
        title: trim_opt(input.title),
        experience: trim_opt(input.experience),
        location: trim_opt(input.location),
        description: trim_opt(input.description),
        pdf_url: pdf_url_patch(input.pdf_url),
    };
    if let Some(title) = &patch.title {
        validation::require_line("Title", title)?;
    }
    if let Some(experience) = &patch.experience {
        validation::require_line("Experience", experience)?;
    }
    if let Some(location) = &patch.location {
        validation::require_line("Location", location)?;
    }
    if let Some(description) = &patch.description {
        validation::require_text("Description", description)?;
    }

    let store = state.store.clone();
    let target = id.clone();
    let updated = with_write_timeout(state.write_timeout(), "Updating vacancy", async move {
        VacancyRepo::update(store.as_ref(), &target, &patch).await
    })
    .await?
    .ok_or_else(|| CoreError::not_found("Vacancy", &id))?;

    tracing::info!(vacancy_id = %id, user_id = %admin.user_id, "Vacancy updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/vacancies/{id}?confirm=true
pub async fn delete_vacancy(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    confirm.require("a vacancy")?;

    let store = state.store.clone();
    let target = id.clone();
    let deleted = with_write_timeout(state.write_timeout(), "Deleting vacancy", async move {
        VacancyRepo::delete(store.as_ref(), &target).await
    })
    .await?;

    if !deleted {
        return Err(CoreError::not_found("Vacancy", &id).into());
    }
    tracing::info!(vacancy_id = %id, user_id = %admin.user_id, "Vacancy deleted");
    Ok(StatusCode::NO_CONTENT)
}
