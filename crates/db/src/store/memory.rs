//! In-process document store.
//!
//! Backs the integration tests and the `STORE_BACKEND=memory` development
//! mode. Contents are lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{expect_object, merge_patch, new_doc_id, Document, DocumentStore};
use crate::error::StoreError;

/// [`DocumentStore`] kept in a map of collection name to documents.
///
/// Documents are held in insertion order; lists return them reversed so the
/// newest comes first, matching the Postgres ordering.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn field_equals(doc: &Document, field: &str, value: &Value) -> bool {
    doc.data.get(field) == Some(value)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|docs| docs.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn insert(&self, collection: &str, data: Value) -> Result<Document, StoreError> {
        let doc = Document {
            collection: collection.to_string(),
            id: new_doc_id(),
            data: Value::Object(expect_object(data)?),
            created_at: Utc::now(),
        };
        let mut guard = self.collections.write().await;
        guard
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<Document>, StoreError> {
        let patch = expect_object(patch)?;
        let mut guard = self.collections.write().await;
        let Some(doc) = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };

        let mut data = expect_object(std::mem::take(&mut doc.data))?;
        merge_patch(&mut data, patch);
        doc.data = Value::Object(data);
        Ok(Some(doc.clone()))
    }

    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
    ) -> Result<Option<i64>, StoreError> {
        let mut guard = self.collections.write().await;
        let Some(doc) = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };
        let Value::Object(data) = &mut doc.data else {
            return Err(StoreError::InvalidDocument(format!("document {id} is not an object")));
        };
        let next = data.get(field).and_then(Value::as_i64).unwrap_or(0) + 1;
        data.insert(field.to_string(), Value::from(next));
        Ok(Some(next))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .rev()
                    .filter(|d| field_equals(d, field, value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count_where(
        &self,
        collection: &str,
        filter: Option<(&str, &Value)>,
    ) -> Result<i64, StoreError> {
        let guard = self.collections.read().await;
        let count = guard.get(collection).map_or(0, |docs| match filter {
            Some((field, value)) => docs.iter().filter(|d| field_equals(d, field, value)).count(),
            None => docs.len(),
        });
        Ok(count as i64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
