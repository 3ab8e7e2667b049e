//! # Durable Storage Boundary
//!
//! The cart mirrors itself into an opaque string key-value store. This
//! module defines that boundary as a trait so the cart logic never knows
//! whether it is talking to SQLite, a test double, or something else.
//!
//! ```text
//! ┌──────────────┐   set(key, json)    ┌──────────────────────────────┐
//! │  CartStore   │ ──────────────────► │  impl KeyValueStore          │
//! │  (app crate) │ ◄────────────────── │  • MemoryStore (this file)   │
//! └──────────────┘   get(key)          │  • KvRepository (storefront- │
//!                                      │    db, SQLite)               │
//!                                      └──────────────────────────────┘
//! ```
//!
//! The trait methods return `Send` futures so stores can be driven from
//! any tokio task.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::{StorageError, StorageResult};

/// An async get/set/remove string store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> impl Future<Output = StorageResult<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = StorageResult<()>> + Send;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = StorageResult<()>> + Send;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// A process-local store backed by a `HashMap`.
///
/// Clones share the same map, so a test can keep one handle for inspection
/// while the cart owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> StorageResult<R> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
