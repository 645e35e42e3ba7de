//! Handlers for job applications: the public Careers form and admin review.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use siliconedge_core::error::CoreError;
use siliconedge_core::storage::{plan_upload, UploadFolder};
use siliconedge_core::validation;
use siliconedge_db::models::application::{
    Application, CreateApplication, UpdateApplication,
};
use siliconedge_db::repositories::ApplicationRepo;
use siliconedge_events::bus::APPLICATION_RECEIVED;
use siliconedge_events::SiteEvent;

use super::multipart::FormData;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ConfirmParams, ProcessedFilter};
use crate::response::{DataResponse, Submitted};
use crate::state::AppState;
use crate::write::with_write_timeout;

/// Confirmation returned after an application is stored.
pub const APPLICATION_CONFIRMATION: &str = "Your application has been submitted successfully.";

/// POST /api/v1/applications
///
/// Multipart form: `name`, `email`, `phone`, `message`, `job_title` and a
/// `resume` file. The résumé is uploaded first; if storing the application
/// then fails, the uploaded object is removed again.
pub async fn submit_application(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Submitted<Application>>)> {
    let mut form = FormData::read(multipart).await?;

    let name = form.text("name");
    let email = form.text("email");
    let phone = form.text("phone");
    let message = form.text("message");
    let job_title = form.text("job_title");
    validation::application(&name, &email, &phone, &job_title, &message)?;

    let resume = form.take_file("resume")?;
    let plan = plan_upload(UploadFolder::Resumes, &resume.filename, resume.bytes.len())?;
    let resume_url = state
        .storage
        .upload(&plan.key, resume.bytes, plan.content_type)
        .await?;

    let input = CreateApplication {
        name,
        email,
        phone,
        message,
        job_title,
        resume_url,
    };
    let store = state.store.clone();
    let saved = with_write_timeout(state.write_timeout(), "Submitting application", async move {
        ApplicationRepo::create(store.as_ref(), &input).await
    })
    .await;

    let application = match saved {
        Ok(application) => application,
        // A timed-out write may still land and will reference the file.
        Err(AppError::Timeout(msg)) => return Err(AppError::Timeout(msg)),
        Err(e) => {
            discard_upload(&state, &plan.key).await;
            return Err(e);
        }
    };

    tracing::info!(
        application_id = %application.id,
        job_title = %application.job_title,
        "Job application received"
    );
    state.event_bus.publish(
        SiteEvent::new(APPLICATION_RECEIVED)
            .with_source(application.id.clone())
            .with_payload(json!({
                "name": application.name,
                "email": application.email,
                "phone": application.phone,
                "job_title": application.job_title,
                "resume_url": application.resume_url,
                "message": application.message,
            })),
    );

    Ok((
        StatusCode::CREATED,
        Json(Submitted {
            data: application,
            message: APPLICATION_CONFIRMATION,
        }),
    ))
}

/// Remove an uploaded résumé whose application could not be stored.
async fn discard_upload(state: &AppState, key: &str) {
    match state.storage.delete(key).await {
        Ok(()) => tracing::info!(key, "Removed résumé of failed application"),
        Err(e) => tracing::error!(key, error = %e, "Failed to remove orphaned résumé"),
    }
}

/// GET /api/v1/admin/applications?processed=
pub async fn list_applications(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<ProcessedFilter>,
) -> AppResult<Json<DataResponse<Vec<Application>>>> {
    let data = ApplicationRepo::list(state.store.as_ref(), filter.processed).await?;
    Ok(Json(DataResponse { data }))
}

/// PATCH /api/v1/admin/applications/{id}
pub async fn update_application(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateApplication>,
) -> AppResult<Json<DataResponse<Application>>> {
    let store = state.store.clone();
    let target = id.clone();
    let updated = with_write_timeout(state.write_timeout(), "Updating application", async move {
        ApplicationRepo::update(store.as_ref(), &target, &input).await
    })
    .await?
    .ok_or_else(|| CoreError::not_found("Application", &id))?;

    tracing::info!(
        application_id = %id,
        processed = updated.processed,
        user_id = %admin.user_id,
        "Application updated"
    );
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/applications/{id}?confirm=true
pub async fn delete_application(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    confirm.require("an application")?;

    let store = state.store.clone();
    let target = id.clone();
    let deleted = with_write_timeout(state.write_timeout(), "Deleting application", async move {
        ApplicationRepo::delete(store.as_ref(), &target).await
    })
    .await?;

    if !deleted {
        return Err(CoreError::not_found("Application", &id).into());
    }
    tracing::info!(application_id = %id, user_id = %admin.user_id, "Application deleted");
    Ok(StatusCode::NO_CONTENT)
}
