//! Shared handle for using one memory store from several tasks
//!
//! Every operation holds the store's lock for its whole duration, so callers
//! never observe a half-applied store, eviction, or consolidation. Reads hand
//! back owned copies so no borrow outlives the lock.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};

use super::store::MemoryStore;
use super::types::{MemoryEntry, MemoryId, MemoryKind, MemoryStats};

/// Cloneable, lock-guarded handle to a [`MemoryStore`]
#[derive(Debug, Clone, Default)]
pub struct SharedMemoryStore {
    inner: Arc<Mutex<MemoryStore>>,
}

impl SharedMemoryStore {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn store(&self, content: Value, kind: MemoryKind, tags: Vec<String>) -> MemoryId {
        self.inner.lock().await.store(content, kind, tags)
    }

    pub async fn retrieve(&self, id: &str) -> Option<MemoryEntry> {
        self.inner.lock().await.retrieve(id).cloned()
    }

    pub async fn recall_by_tag(&self, tag: &str) -> Vec<MemoryEntry> {
        let store = self.inner.lock().await;
        store.recall_by_tag(tag).into_iter().cloned().collect()
    }

    pub async fn get_recent_memories(&self, count: usize) -> Vec<MemoryEntry> {
        let store = self.inner.lock().await;
        store.get_recent_memories(count).into_iter().cloned().collect()
    }

    pub async fn consolidate(&self, id: &str) -> bool {
        self.inner.lock().await.consolidate(id)
    }

    pub async fn get_memory_stats(&self) -> MemoryStats {
        self.inner.lock().await.get_memory_stats()
    }

    /// Hold the lock across several operations
    pub async fn lock(&self) -> MutexGuard<'_, MemoryStore> {
        self.inner.lock().await
    }
}

impl From<MemoryStore> for SharedMemoryStore {
    fn from(store: MemoryStore) -> Self {
        Self::new(store)
    }
}
