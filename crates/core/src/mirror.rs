//! In-memory mirror of a remote collection.
//!
//! The admin views keep a local copy of each collection they manage. The copy
//! is replaced wholesale after a bulk fetch and patched by exactly one keyed
//! change after each successful create, update or delete. Callers only apply
//! a change once the remote call has succeeded, so the mirror never runs
//! ahead of the last remote response it observed.

use crate::types::DocId;

/// Anything addressed by a document id.
pub trait Identified {
    fn doc_id(&self) -> &str;
}

/// Ordered local copy of a remote list (newest first).
#[derive(Debug, Clone)]
pub struct Mirror<T> {
    items: Vec<T>,
}

impl<T> Default for Mirror<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> Mirror<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local copy with a fresh bulk fetch.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|i| i.doc_id() == id)
    }

    pub fn ids(&self) -> Vec<DocId> {
        self.items.iter().map(|i| i.doc_id().to_string()).collect()
    }

    /// Record a created document at the front of the list.
    ///
    /// A stale entry with the same id is dropped first so the id appears once.
    pub fn apply_insert(&mut self, item: T) {
        self.items.retain(|i| i.doc_id() != item.doc_id());
        self.items.insert(0, item);
    }

    /// Replace the entry with the same id, keeping its position.
    ///
    /// Returns `false` (and changes nothing) if the id is not mirrored.
    pub fn apply_update(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|i| i.doc_id() == item.doc_id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with `id`, returning it if it was mirrored.
    pub fn apply_remove(&mut self, id: &str) -> Option<T> {
        let pos = self.items.iter().position(|i| i.doc_id() == id)?;
        Some(self.items.remove(pos))
    }
}
