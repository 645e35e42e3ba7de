//! Repository for the `applications` collection.

use serde_json::Value;

use crate::error::StoreError;
use crate::models::application::{Application, CreateApplication, UpdateApplication};
use crate::store::DocumentStore;

/// Provides data access for job applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Applications, newest first, optionally filtered by the processed flag.
    pub async fn list(
        store: &dyn DocumentStore,
        processed: Option<bool>,
    ) -> Result<Vec<Application>, StoreError> {
        match processed {
            Some(flag) => super::list_where(store, "processed", &Value::Bool(flag)).await,
            None => super::list_all(store).await,
        }
    }

    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Application>, StoreError> {
        super::find(store, id).await
    }

    /// Store a submitted application (unprocessed).
    pub async fn create(
        store: &dyn DocumentStore,
        dto: &CreateApplication,
    ) -> Result<Application, StoreError> {
        super::insert(store, dto).await
    }

    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        dto: &UpdateApplication,
    ) -> Result<Option<Application>, StoreError> {
        super::update(store, id, dto).await
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        super::delete::<Application>(store, id).await
    }

    /// Number of applications not yet handled by an admin.
    pub async fn count_unprocessed(store: &dyn DocumentStore) -> Result<i64, StoreError> {
        store
            .count_where(
                crate::collections::APPLICATIONS,
                Some(("processed", &Value::Bool(false))),
            )
            .await
    }

    pub async fn count(store: &dyn DocumentStore) -> Result<i64, StoreError> {
        store.count_where(crate::collections::APPLICATIONS, None).await
    }
}
