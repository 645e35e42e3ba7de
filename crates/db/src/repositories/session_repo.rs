//! Repository for the `sessions` collection.

use chrono::Utc;
use serde_json::Value;

use crate::collections::SESSIONS;
use crate::error::StoreError;
use crate::models::session::{CreateSession, Session};
use crate::store::DocumentStore;

/// Provides data access for refresh-token sessions.
pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(
        store: &dyn DocumentStore,
        dto: &CreateSession,
    ) -> Result<Session, StoreError> {
        super::insert(store, dto).await
    }

    /// Find an unexpired session by its refresh-token hash.
    ///
    /// A matching session that has expired is deleted on the way.
    pub async fn find_by_refresh_token_hash(
        store: &dyn DocumentStore,
        token_hash: &str,
    ) -> Result<Option<Session>, StoreError> {
        let hash = Value::String(token_hash.to_string());
        let sessions: Vec<Session> =
            super::list_where(store, "refresh_token_hash", &hash).await?;
        let now = Utc::now();
        let (live, expired): (Vec<_>, Vec<_>) =
            sessions.into_iter().partition(|s| s.expires_at > now);
        for session in expired {
            store.delete(SESSIONS, &session.id).await?;
        }
        Ok(live.into_iter().next())
    }

    /// Delete the expired sessions of `user_id`. Returns the number removed.
    pub async fn purge_expired_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<u64, StoreError> {
        let user = Value::String(user_id.to_string());
        let sessions: Vec<Session> = super::list_where(store, "user_id", &user).await?;
        let now = Utc::now();
        let mut removed = 0;
        for session in sessions.iter().filter(|s| s.expires_at <= now) {
            if store.delete(SESSIONS, &session.id).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Revoke one session. Returns `true` if it existed.
    pub async fn revoke(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        store.delete(SESSIONS, id).await
    }

    /// Revoke every session belonging to `user_id`. Returns the number removed.
    pub async fn revoke_all_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<u64, StoreError> {
        let user = Value::String(user_id.to_string());
        let docs = store.find_by_field(SESSIONS, "user_id", &user).await?;
        let mut removed = 0;
        for doc in docs {
            if store.delete(SESSIONS, &doc.id).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
