//! Admin file uploads (case-study PDFs and the like).

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use siliconedge_core::storage::{plan_upload, UploadFolder};

use super::multipart::FormData;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Object key, `<folder>/<millis>_<filename>`.
    pub key: String,
    /// Public URL to store on the owning document.
    pub url: String,
}

/// POST /api/v1/admin/uploads
///
/// Multipart form with a `folder` field (`resumes` or `caseStudies`) and a
/// `file` part.
pub async fn upload_file(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadResponse>>)> {
    let mut form = FormData::read(multipart).await?;

    let folder_name = form.text("folder");
    if folder_name.is_empty() {
        return Err(AppError::BadRequest("Missing required 'folder' field".into()));
    }
    let folder = UploadFolder::from_name(&folder_name)?;
    let file = form.take_file("file")?;

    let plan = plan_upload(folder, &file.filename, file.bytes.len())?;
    let size = file.bytes.len();
    let url = state
        .storage
        .upload(&plan.key, file.bytes, plan.content_type)
        .await?;

    tracing::info!(key = %plan.key, size, user_id = %admin.user_id, "File uploaded");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResponse { key: plan.key, url },
        }),
    ))
}
