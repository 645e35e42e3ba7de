//! Repository layer: typed CRUD over a [`DocumentStore`].
//!
//! Each repository is a zero-sized struct with associated async functions
//! that take `&dyn DocumentStore` as the first argument. The generic
//! helpers below do the document <-> record mapping once for every
//! collection.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::models::{decode, encode, Entity};
use crate::store::DocumentStore;

pub mod admin_user_repo;
pub mod application_repo;
pub mod case_study_repo;
pub mod contact_repo;
pub mod session_repo;
pub mod vacancy_repo;

pub use admin_user_repo::AdminUserRepo;
pub use application_repo::ApplicationRepo;
pub use case_study_repo::CaseStudyRepo;
pub use contact_repo::ContactRepo;
pub use session_repo::SessionRepo;
pub use vacancy_repo::VacancyRepo;

/// Every record in `T`'s collection, newest first.
pub async fn list_all<T: Entity>(store: &dyn DocumentStore) -> Result<Vec<T>, StoreError> {
    store
        .list(T::COLLECTION)
        .await?
        .into_iter()
        .map(decode)
        .collect()
}

/// Records whose top-level `field` equals `value`, newest first.
pub async fn list_where<T: Entity>(
    store: &dyn DocumentStore,
    field: &str,
    value: &Value,
) -> Result<Vec<T>, StoreError> {
    store
        .find_by_field(T::COLLECTION, field, value)
        .await?
        .into_iter()
        .map(decode)
        .collect()
}

/// One record by id.
pub async fn find<T: Entity>(store: &dyn DocumentStore, id: &str) -> Result<Option<T>, StoreError> {
    store.get(T::COLLECTION, id).await?.map(decode).transpose()
}

/// Insert a record built from `dto` plus the entity's server-side fields.
pub async fn insert<T: Entity, D: Serialize + Sync>(
    store: &dyn DocumentStore,
    dto: &D,
) -> Result<T, StoreError> {
    let mut body = encode(dto)?;
    T::on_insert(&mut body, &Utc::now());
    let doc = store.insert(T::COLLECTION, Value::Object(body)).await?;
    decode(doc)
}

/// Shallow-merge `patch` into a record. `None` if it does not exist.
pub async fn update<T: Entity, P: Serialize + Sync>(
    store: &dyn DocumentStore,
    id: &str,
    patch: &P,
) -> Result<Option<T>, StoreError> {
    let body = encode(patch)?;
    store
        .update(T::COLLECTION, id, Value::Object(body))
        .await?
        .map(decode)
        .transpose()
}

/// Delete a record. Returns `true` if it existed.
pub async fn delete<T: Entity>(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
    store.delete(T::COLLECTION, id).await
}
