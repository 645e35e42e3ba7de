//! Repository for the `contacts` collection.

use serde_json::Value;

use crate::collections::CONTACTS;
use crate::error::StoreError;
use crate::models::contact::{ContactMessage, CreateContactMessage, UpdateContactMessage};
use crate::store::DocumentStore;

/// Provides data access for contact form messages.
pub struct ContactRepo;

impl ContactRepo {
    /// Messages, newest first, optionally filtered by the processed flag.
    pub async fn list(
        store: &dyn DocumentStore,
        processed: Option<bool>,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        match processed {
            Some(flag) => super::list_where(store, "processed", &Value::Bool(flag)).await,
            None => super::list_all(store).await,
        }
    }

    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<ContactMessage>, StoreError> {
        super::find(store, id).await
    }

    /// Store a submitted message (unprocessed).
    pub async fn create(
        store: &dyn DocumentStore,
        dto: &CreateContactMessage,
    ) -> Result<ContactMessage, StoreError> {
        super::insert(store, dto).await
    }

    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        dto: &UpdateContactMessage,
    ) -> Result<Option<ContactMessage>, StoreError> {
        super::update(store, id, dto).await
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        super::delete::<ContactMessage>(store, id).await
    }

    pub async fn count_unprocessed(store: &dyn DocumentStore) -> Result<i64, StoreError> {
        store
            .count_where(CONTACTS, Some(("processed", &Value::Bool(false))))
            .await
    }

    pub async fn count(store: &dyn DocumentStore) -> Result<i64, StoreError> {
        store.count_where(CONTACTS, None).await
    }
}
