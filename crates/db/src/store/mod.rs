//! The document-store contract.
//!
//! A store holds JSON-object documents grouped into named collections. Each
//! document has an opaque id and a server-set creation timestamp. Updates are
//! shallow merges of the provided top-level fields; the last write wins.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use siliconedge_core::types::{DocId, Timestamp};

use crate::error::StoreError;

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// A stored document.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Document {
    pub collection: String,
    pub id: DocId,
    /// Always a JSON object.
    pub data: Value,
    pub created_at: Timestamp,
}

/// Collection/id CRUD over JSON documents.
///
/// Lists are ordered newest first.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection`.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// One document by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Insert `data` (a JSON object) under a freshly assigned id.
    async fn insert(&self, collection: &str, data: Value) -> Result<Document, StoreError>;

    /// Shallow-merge `patch` (a JSON object) into an existing document.
    ///
    /// Returns `None` if the document does not exist.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<Document>, StoreError>;

    /// Add one to the integer at top-level `field` in a single atomic step.
    ///
    /// A missing field counts as zero. Returns the new value, or `None` if
    /// the document does not exist.
    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
    ) -> Result<Option<i64>, StoreError>;

    /// Delete a document. Returns `true` if it existed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Documents whose top-level `field` equals `value`.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Number of documents, optionally restricted to `field == value`.
    async fn count_where(
        &self,
        collection: &str,
        filter: Option<(&str, &Value)>,
    ) -> Result<i64, StoreError>;

    /// Confirm the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Unwrap `value` as a JSON object or fail with [`StoreError::InvalidDocument`].
pub(crate) fn expect_object(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Shallow merge: every top-level key in `patch` overwrites `target`.
pub(crate) fn merge_patch(target: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}

/// Fresh document id (UUID v7, simple form, so ids sort by creation time).
pub(crate) fn new_doc_id() -> DocId {
    uuid::Uuid::now_v7().simple().to_string()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn merge_overwrites_only_given_keys() {
        let mut target = expect_object(json!({ "a": 1, "b": 2 })).unwrap();
        merge_patch(&mut target, expect_object(json!({ "b": 3, "c": 4 })).unwrap());
        assert_eq!(Value::Object(target), json!({ "a": 1, "b": 3, "c": 4 }));
    }

    #[test]
    fn non_object_is_rejected() {
        assert_matches!(
            expect_object(json!([1, 2])),
            Err(StoreError::InvalidDocument(m)) if m.contains("an array")
        );
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_doc_id(), new_doc_id());
    }
}
