//! Layout settings (navbar, branding, hero) stored in the local settings file.

use axum::extract::State;
use axum::Json;
use siliconedge_core::layout::LayoutSettings;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/layout
///
/// Saved layout, or defaults when nothing valid is stored.
pub async fn get_layout(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<LayoutSettings>>> {
    let layout = state.settings.layout().await?;
    Ok(Json(DataResponse { data: layout }))
}

/// PUT /api/v1/admin/layout
pub async fn put_layout(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(layout): Json<LayoutSettings>,
) -> AppResult<Json<DataResponse<LayoutSettings>>> {
    layout.validate()?;
    state.settings.save_layout(&layout).await?;

    tracing::info!(user_id = %admin.user_id, "Layout settings saved");
    Ok(Json(DataResponse { data: layout }))
}

/// POST /api/v1/admin/layout/reset
pub async fn reset_layout(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<LayoutSettings>>> {
    let layout = state.settings.reset_layout().await?;

    tracing::info!(user_id = %admin.user_id, "Layout settings reset to defaults");
    Ok(Json(DataResponse { data: layout }))
}
