//! Repository for the `adminUsers` collection.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::collections::ADMIN_USERS;
use crate::error::StoreError;
use crate::models::admin_user::{AdminUser, CreateAdminUser, UpdateAdminProfile};
use crate::store::DocumentStore;

/// Provides data access for admin accounts.
pub struct AdminUserRepo;

impl AdminUserRepo {
    /// Find an account by email (case-insensitive; emails are stored lowercased).
    pub async fn find_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<AdminUser>, StoreError> {
        let email = Value::String(email.trim().to_lowercase());
        let mut users: Vec<AdminUser> = super::list_where(store, "email", &email).await?;
        Ok(users.pop())
    }

    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<AdminUser>, StoreError> {
        super::find(store, id).await
    }

    /// Insert a new account. The caller hashes the password and checks
    /// email uniqueness.
    pub async fn create(
        store: &dyn DocumentStore,
        dto: &CreateAdminUser,
    ) -> Result<AdminUser, StoreError> {
        let dto = CreateAdminUser {
            email: dto.email.trim().to_lowercase(),
            ..dto.clone()
        };
        super::insert(store, &dto).await
    }

    pub async fn update_profile(
        store: &dyn DocumentStore,
        id: &str,
        dto: &UpdateAdminProfile,
    ) -> Result<Option<AdminUser>, StoreError> {
        let dto = UpdateAdminProfile {
            display_name: dto.display_name.as_ref().map(|n| n.trim().to_string()),
            email: dto.email.as_ref().map(|e| e.trim().to_lowercase()),
        };
        super::update(store, id, &dto).await
    }

    pub async fn set_password_hash(
        store: &dyn DocumentStore,
        id: &str,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let patch = json!({ "password_hash": password_hash });
        Ok(store.update(ADMIN_USERS, id, patch).await?.is_some())
    }

    /// Atomically bump the failed-login counter and return the new count.
    ///
    /// Concurrent failures each see a distinct count. An account that no
    /// longer exists reports zero.
    pub async fn increment_failed_login(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<i32, StoreError> {
        let count = store
            .increment(ADMIN_USERS, id, "failed_login_count")
            .await?
            .unwrap_or(0);
        Ok(i32::try_from(count).unwrap_or(i32::MAX))
    }

    /// Forget an expired lock so the next failures count from zero.
    pub async fn clear_lockout(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
        let patch = json!({ "failed_login_count": 0, "locked_until": null });
        store.update(ADMIN_USERS, id, patch).await?;
        Ok(())
    }

    /// Block logins until `until`.
    pub async fn lock_account(
        store: &dyn DocumentStore,
        id: &str,
        until: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        store
            .update(ADMIN_USERS, id, json!({ "locked_until": until }))
            .await?;
        Ok(())
    }

    /// Reset the lockout state and stamp the login time.
    pub async fn record_successful_login(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<(), StoreError> {
        let patch = json!({
            "failed_login_count": 0,
            "locked_until": null,
            "last_login_at": Utc::now(),
        });
        store.update(ADMIN_USERS, id, patch).await?;
        Ok(())
    }

    pub async fn count(store: &dyn DocumentStore) -> Result<i64, StoreError> {
        store.count_where(ADMIN_USERS, None).await
    }
}
