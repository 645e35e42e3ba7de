//! Handlers for the `/auth` resource: registration, login, token refresh,
//! logout and the signed-in admin's own profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use siliconedge_core::error::CoreError;
use siliconedge_core::roles::ROLE_ADMIN;
use siliconedge_core::validation;
use siliconedge_db::models::admin_user::{AdminUser, CreateAdminUser, UpdateAdminProfile};
use siliconedge_db::models::session::CreateSession;
use siliconedge_db::repositories::{AdminUserRepo, SessionRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Wrong passwords in a row that trigger a lock.
pub const MAX_FAILED_ATTEMPTS: i32 = 5;

pub const LOCK_DURATION_MINS: i64 = 15;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const EMAIL_TAKEN: &str = "An account with this email already exists";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Token pair handed out by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Single use; presenting it to `/auth/refresh` retires it.
    pub refresh_token: String,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    pub user: AdminUser,
}

fn unauthorized(msg: &str) -> AppError {
    CoreError::Unauthorized(msg.to_owned()).into()
}

fn password_matches(candidate: &str, stored_hash: &str) -> AppResult<bool> {
    verify_password(candidate, stored_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}

fn new_password_hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// Creates an admin and signs them in. 403 when `ALLOW_REGISTRATION=false`.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    if !state.config.allow_registration {
        return Err(CoreError::Forbidden("Registration is disabled".into()).into());
    }

    validation::profile(&input.display_name, &input.email)?;
    validation::password(&input.password)?;

    let store = state.store.as_ref();
    if AdminUserRepo::find_by_email(store, &input.email).await?.is_some() {
        return Err(CoreError::Conflict(EMAIL_TAKEN.into()).into());
    }

    let password_hash = new_password_hash(&input.password)?;
    let user = AdminUserRepo::create(
        store,
        &CreateAdminUser {
            email: input.email,
            display_name: input.display_name.trim().to_string(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "Admin account registered");
    Ok((StatusCode::CREATED, Json(issue_tokens(&state, user).await?)))
}

/// Email and password sign-in.
///
/// Unknown emails and wrong passwords get the same 401. The fifth wrong
/// password in a row locks the account for [`LOCK_DURATION_MINS`].
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let store = state.store.as_ref();
    let Some(user) = AdminUserRepo::find_by_email(store, &input.email).await? else {
        return Err(unauthorized(INVALID_CREDENTIALS));
    };

    let now = Utc::now();
    match user.locked_until {
        Some(until) if until > now => {
            return Err(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )
            .into());
        }
        // The lock ran out; the next five failures start a fresh count.
        Some(_) => AdminUserRepo::clear_lockout(store, &user.id).await?,
        None => {}
    }

    if !password_matches(&input.password, &user.password_hash)? {
        let failures = AdminUserRepo::increment_failed_login(store, &user.id).await?;
        if failures >= MAX_FAILED_ATTEMPTS {
            let until = now + chrono::Duration::minutes(LOCK_DURATION_MINS);
            AdminUserRepo::lock_account(store, &user.id, until).await?;
            tracing::warn!(user_id = %user.id, failures, "Admin account locked");
        }
        return Err(unauthorized(INVALID_CREDENTIALS));
    }

    AdminUserRepo::record_successful_login(store, &user.id).await?;
    tracing::info!(user_id = %user.id, "Admin signed in");
    Ok(Json(issue_tokens(&state, user).await?))
}

/// Trades a refresh token for a fresh pair. The old session is revoked
/// first, so replaying the same token fails.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let store = state.store.as_ref();
    let digest = hash_refresh_token(&input.refresh_token);
    let Some(session) = SessionRepo::find_by_refresh_token_hash(store, &digest).await? else {
        return Err(unauthorized("Invalid or expired refresh token"));
    };
    SessionRepo::revoke(store, &session.id).await?;

    let Some(user) = AdminUserRepo::find_by_id(store, &session.user_id).await? else {
        return Err(unauthorized("User no longer exists"));
    };
    Ok(Json(issue_tokens(&state, user).await?))
}

/// Revokes every session of the caller, on all devices.
pub async fn logout(State(state): State<AppState>, caller: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(state.store.as_ref(), &caller.user_id).await?;
    tracing::info!(user_id = %caller.user_id, revoked, "Admin signed out");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(
    State(state): State<AppState>,
    caller: AuthUser,
) -> AppResult<Json<DataResponse<AdminUser>>> {
    let user = current_user(&state, &caller).await?;
    Ok(Json(DataResponse { data: user }))
}

/// Edits display name or email. Taking another admin's email is a 409.
pub async fn update_profile(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<UpdateAdminProfile>,
) -> AppResult<Json<DataResponse<AdminUser>>> {
    let store = state.store.as_ref();
    let user = current_user(&state, &caller).await?;

    let display_name = input.display_name.as_deref().unwrap_or(&user.display_name);
    let email = input.email.as_deref().unwrap_or(&user.email);
    validation::profile(display_name, email)?;

    if let Some(new_email) = &input.email {
        let owner = AdminUserRepo::find_by_email(store, new_email).await?;
        if owner.is_some_and(|owner| owner.id != user.id) {
            return Err(CoreError::Conflict(EMAIL_TAKEN.into()).into());
        }
    }

    let updated = AdminUserRepo::update_profile(store, &user.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("AdminUser", &user.id))?;

    tracing::info!(user_id = %user.id, "Admin profile updated");
    Ok(Json(DataResponse { data: updated }))
}

/// Needs the current password. Success signs the admin out everywhere.
pub async fn change_password(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let store = state.store.as_ref();
    let user = current_user(&state, &caller).await?;

    if !password_matches(&input.current_password, &user.password_hash)? {
        return Err(unauthorized("Current password is incorrect"));
    }
    validation::password(&input.new_password)?;

    let password_hash = new_password_hash(&input.new_password)?;
    if !AdminUserRepo::set_password_hash(store, &user.id, &password_hash).await? {
        return Err(CoreError::not_found("AdminUser", &user.id).into());
    }
    SessionRepo::revoke_all_for_user(store, &user.id).await?;

    tracing::info!(user_id = %user.id, "Admin password changed");
    Ok(StatusCode::NO_CONTENT)
}

async fn current_user(state: &AppState, caller: &AuthUser) -> AppResult<AdminUser> {
    AdminUserRepo::find_by_id(state.store.as_ref(), &caller.user_id)
        .await?
        .ok_or_else(|| unauthorized("User no longer exists"))
}

/// Signs an access token and opens a refresh session for `user`.
async fn issue_tokens(state: &AppState, user: AdminUser) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(&user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token signing failed: {e}")))?;

    let (refresh_token, refresh_token_hash) = generate_refresh_token();
    let session = CreateSession {
        user_id: user.id.clone(),
        refresh_token_hash,
        expires_at: Utc::now() + jwt.refresh_ttl(),
    };
    let store = state.store.as_ref();
    SessionRepo::purge_expired_for_user(store, &user.id).await?;
    SessionRepo::create(store, &session).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: jwt.access_ttl().num_seconds(),
        user,
    })
}
