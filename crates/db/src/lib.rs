//! Entity store primitives for the Folio catalog.
//!
//! Repositories in the resource modules are defined as traits; this crate
//! provides the error type shared by every backend plus [`MemTable`], the
//! in-memory table the default repository implementations are built on.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

/// Identifier assigned to every persisted record. Generated ids start at 1.
pub type EntityId = i64;

/// Fault raised by a storage backend.
///
/// Distinct from the success/failure signal of individual writes: a refused
/// write is reported through the operation's return value, while `StoreError`
/// covers faults the caller cannot act on.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Result alias used by every repository operation.
pub type StoreResult<T> = Result<T, StoreError>;

/// In-memory table keyed by [`EntityId`], with a monotonic id sequence.
///
/// Rows are held behind an async `RwLock`; each operation takes the lock
/// once, so no guarantee spans two calls. Callers performing check-then-act
/// sequences must handle the row changing in between.
pub struct MemTable<T> {
    rows: RwLock<BTreeMap<EntityId, T>>,
    next_id: AtomicI64,
}

impl<T: Clone> MemTable<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// All rows in ascending id order.
    pub async fn find_all(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    pub async fn find_by_id(&self, id: EntityId) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn exists(&self, id: EntityId) -> bool {
        self.rows.read().await.contains_key(&id)
    }

    /// Insert a new row, handing the generated id to `make`.
    /// Returns the stored row.
    pub async fn insert_with(&self, make: impl FnOnce(EntityId) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = make(id);
        self.rows.write().await.insert(id, row.clone());
        tracing::debug!(id, "row inserted");
        row
    }

    /// Replace the row stored under `id`. Returns `false` when no such row.
    pub async fn replace(&self, id: EntityId, row: T) -> bool {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                tracing::debug!(id, "row replaced");
                true
            }
            None => false,
        }
    }

    /// Remove the row stored under `id`. Returns `false` when no such row.
    pub async fn remove(&self, id: EntityId) -> bool {
        let removed = self.rows.write().await.remove(&id).is_some();
        if removed {
            tracing::debug!(id, "row removed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<T: Clone> Default for MemTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
