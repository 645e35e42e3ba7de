//! HTTP-level tests for registration, login, refresh, logout, the profile
//! endpoints and account lockout.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    body_json, get, get_auth, login, post_auth, post_json, put_json_auth, seed_admin,
    ADMIN_EMAIL, ADMIN_PASSWORD,
};
use serde_json::json;
use siliconedge_db::models::session::CreateSession;
use siliconedge_db::repositories::{AdminUserRepo, SessionRepo};

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_success_returns_tokens_and_user() {
    let test = common::build_test_app();
    let admin = seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let json = login(test.app(), ADMIN_EMAIL, ADMIN_PASSWORD).await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["id"], admin.id);
    assert_eq!(json["user"]["email"], ADMIN_EMAIL);
    assert_eq!(json["user"]["role"], "admin");
    assert!(json["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn login_email_is_case_insensitive() {
    let test = common::build_test_app();
    seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let body = json!({ "email": "ADMIN@SiliconEdge.test", "password": ADMIN_PASSWORD });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_wrong_password_returns_401() {
    let test = common::build_test_app();
    seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let body = json!({ "email": ADMIN_EMAIL, "password": "not-the-password" });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid email or password");
}

#[tokio::test]
async fn login_unknown_email_returns_401() {
    let test = common::build_test_app();
    let body = json!({ "email": "nobody@x.com", "password": "whatever1" });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn account_locks_after_five_failures() {
    let test = common::build_test_app();
    let admin = seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;

    for _ in 0..5 {
        let body = json!({ "email": ADMIN_EMAIL, "password": "wrong-password" });
        let response = post_json(test.app(), "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is refused while locked.
    let body = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let stored = AdminUserRepo::find_by_id(test.store.as_ref(), &admin.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.failed_login_count, 5);
    assert!(stored.locked_until.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_failures_still_lock_the_account() {
    let test = common::build_test_app();
    let admin = seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let app = test.app();
            tokio::spawn(async move {
                let body = json!({ "email": ADMIN_EMAIL, "password": "wrong-password" });
                post_json(app, "/api/v1/auth/login", body).await.status()
            })
        })
        .collect();
    for attempt in attempts {
        let status = attempt.await.unwrap();
        assert!(
            status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN,
            "unexpected status {status}"
        );
    }

    let stored = AdminUserRepo::find_by_id(test.store.as_ref(), &admin.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.failed_login_count >= 5);
    assert!(stored.locked_until.is_some());

    let body = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn expired_lock_needs_five_new_failures() {
    let test = common::build_test_app();
    let admin = seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;
    for _ in 0..5 {
        AdminUserRepo::increment_failed_login(test.store.as_ref(), &admin.id)
            .await
            .unwrap();
    }
    let expired = Utc::now() - Duration::minutes(1);
    AdminUserRepo::lock_account(test.store.as_ref(), &admin.id, expired)
        .await
        .unwrap();

    let body = json!({ "email": ADMIN_EMAIL, "password": "wrong-password" });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let stored = AdminUserRepo::find_by_id(test.store.as_ref(), &admin.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.failed_login_count, 1);
    assert!(stored.locked_until.is_none());

    login(test.app(), ADMIN_EMAIL, ADMIN_PASSWORD).await;
}

#[tokio::test]
async fn login_sweeps_expired_sessions() {
    let test = common::build_test_app();
    let admin = seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let stale = CreateSession {
        user_id: admin.id.clone(),
        refresh_token_hash: "stale".to_string(),
        expires_at: Utc::now() - Duration::days(1),
    };
    SessionRepo::create(test.store.as_ref(), &stale).await.unwrap();

    login(test.app(), ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let remaining = SessionRepo::revoke_all_for_user(test.store.as_ref(), &admin.id)
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}

#[tokio::test]
async fn successful_login_resets_failure_count() {
    let test = common::build_test_app();
    let admin = seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let body = json!({ "email": ADMIN_EMAIL, "password": "wrong-password" });
    post_json(test.app(), "/api/v1/auth/login", body).await;
    login(test.app(), ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let stored = AdminUserRepo::find_by_id(test.store.as_ref(), &admin.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.failed_login_count, 0);
    assert!(stored.last_login_at.is_some());
}

#[tokio::test]
async fn refresh_rotates_the_token() {
    let test = common::build_test_app();
    seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let first = login(test.app(), ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let refresh_token = first["refresh_token"].as_str().unwrap();

    let body = json!({ "refresh_token": refresh_token });
    let response = post_json(test.app(), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_ne!(second["refresh_token"], first["refresh_token"]);

    // The old token is single-use.
    let response = post_json(test.app(), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_refresh_tokens() {
    let test = common::build_test_app();
    seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let json = login(test.app(), ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let access = json["access_token"].as_str().unwrap();

    let response = post_auth(test.app(), "/api/v1/auth/logout", access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let refresh_token = json["refresh_token"].clone();
    let body = json!({ "refresh_token": refresh_token });
    let response = post_json(test.app(), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_creates_admin_and_signs_in() {
    let test = common::build_test_app();
    let body = json!({
        "email": "New.Admin@x.com",
        "display_name": "  New Admin ",
        "password": "long-enough-password",
    });

    let response = post_json(test.app(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "new.admin@x.com");
    assert_eq!(json["user"]["display_name"], "New Admin");
    assert_eq!(json["user"]["role"], "admin");

    let access = json["access_token"].as_str().unwrap();
    let response = get_auth(test.app(), "/api/v1/admin/dashboard", access).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_duplicate_email_returns_409() {
    let test = common::build_test_app();
    seed_admin(test.store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let body = json!({
        "email": ADMIN_EMAIL,
        "display_name": "Someone",
        "password": "long-enough-password",
    });
    let response = post_json(test.app(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_rejects_short_password() {
    let test = common::build_test_app();
    let body = json!({ "email": "a@x.com", "display_name": "A", "password": "short" });
    let response = post_json(test.app(), "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn register_disabled_returns_403() {
    let test = common::build_test_app_with(|config| config.allow_registration = false);
    let body = json!({
        "email": "a@x.com",
        "display_name": "A",
        "password": "long-enough-password",
    });

    let response = post_json(test.app(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "Registration is disabled");
}

// ---------------------------------------------------------------------------
// Current admin
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_requires_a_token() {
    let test = common::build_test_app();
    let response = get(test.app(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_token_is_rejected() {
    let test = common::build_test_app();
    let response = get_auth(test.app(), "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");
}

#[tokio::test]
async fn profile_update_changes_name_and_email() {
    let test = common::build_test_app();
    let token = common::admin_token(&test).await;

    let body = json!({ "display_name": "Ops Lead", "email": "Ops@X.com" });
    let response = put_json_auth(test.app(), "/api/v1/auth/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(test.app(), "/api/v1/auth/me", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["display_name"], "Ops Lead");
    assert_eq!(json["data"]["email"], "ops@x.com");
}

#[tokio::test]
async fn profile_update_rejects_email_of_another_admin() {
    let test = common::build_test_app();
    seed_admin(test.store.as_ref(), "other@x.com", ADMIN_PASSWORD).await;
    let token = common::admin_token(&test).await;

    let body = json!({ "email": "other@x.com" });
    let response = put_json_auth(test.app(), "/api/v1/auth/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn change_password_requires_current_password() {
    let test = common::build_test_app();
    let token = common::admin_token(&test).await;

    let body = json!({ "current_password": "wrong-password", "new_password": "brand-new-pass" });
    let response = put_json_auth(test.app(), "/api/v1/auth/password", body, &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json!({ "current_password": ADMIN_PASSWORD, "new_password": "brand-new-pass" });
    let response = put_json_auth(test.app(), "/api/v1/auth/password", body, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let old = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
    let response = post_json(test.app(), "/api/v1/auth/login", old).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    login(test.app(), ADMIN_EMAIL, "brand-new-pass").await;
}
