//! Store-backed collection mirror for the admin views.
//!
//! [`CollectionMirror`] pairs a [`DocumentStore`] collection with a local
//! [`Mirror`]. Every mutation goes to the store first; the local list is
//! patched only after the store call succeeds, with exactly one keyed change.
//! A failed call returns the error and leaves the local list as it was.

use std::sync::Arc;

use serde::Serialize;
use siliconedge_core::mirror::{Identified, Mirror};

use crate::error::StoreError;
use crate::models::Entity;
use crate::repositories;
use crate::store::DocumentStore;

/// Local copy of one collection, kept in step with the store.
pub struct CollectionMirror<T> {
    store: Arc<dyn DocumentStore>,
    local: Mirror<T>,
}

impl<T> CollectionMirror<T>
where
    T: Entity + Identified + Clone,
{
    /// An empty mirror. Call [`load`](Self::load) to populate it.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            local: Mirror::new(),
        }
    }

    /// Bulk fetch the collection, replacing the local copy.
    pub async fn load(&mut self) -> Result<&[T], StoreError> {
        let items = repositories::list_all::<T>(self.store.as_ref()).await?;
        self.local.replace_all(items);
        tracing::debug!(
            collection = T::COLLECTION,
            count = self.local.len(),
            "Mirror loaded"
        );
        Ok(self.local.items())
    }

    pub fn items(&self) -> &[T] {
        self.local.items()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.local.get(id)
    }

    /// Insert into the store, then add the created record at the front.
    pub async fn create<D: Serialize + Sync>(&mut self, dto: &D) -> Result<T, StoreError> {
        let created: T = repositories::insert(self.store.as_ref(), dto).await?;
        self.local.apply_insert(created.clone());
        Ok(created)
    }

    /// Patch a record in the store, then replace the local copy.
    ///
    /// Returns `None` if the store has no such record.
    pub async fn update<P: Serialize + Sync>(
        &mut self,
        id: &str,
        patch: &P,
    ) -> Result<Option<T>, StoreError> {
        let updated: Option<T> = repositories::update(self.store.as_ref(), id, patch).await?;
        if let Some(item) = &updated {
            self.local.apply_update(item.clone());
        }
        Ok(updated)
    }

    /// Delete a record from the store, then drop it locally.
    ///
    /// Returns `true` if the store held the record.
    pub async fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let existed = repositories::delete::<T>(self.store.as_ref(), id).await?;
        self.local.apply_remove(id);
        Ok(existed)
    }
}
