//! Admin-only access.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use siliconedge_core::error::CoreError;
use siliconedge_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] holding the `admin` role; anyone else gets 403.
///
/// Every `/admin/*` handler takes this as its first extractor.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role.as_str() {
            ROLE_ADMIN => Ok(RequireAdmin(user)),
            other => {
                tracing::debug!(user_id = %user.user_id, role = other, "Admin route refused");
                Err(AppError::Core(CoreError::Forbidden("Admin role required".into())))
            }
        }
    }
}
