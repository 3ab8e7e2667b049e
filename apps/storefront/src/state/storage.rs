//! # Storage Mirror State
//!
//! The concrete store the cart writes through at runtime.
//!
//! ```text
//! open(config)
//!     │
//!     ├── SQLite opens ──────────► MirrorStore::Sqlite(KvRepository)
//!     │
//!     └── SQLite fails ── warn! ─► MirrorStore::Memory(MemoryStore)
//!                                  (cart still works, nothing survives exit)
//! ```

use std::path::Path;

use tracing::{info, warn};

use storefront_core::{KeyValueStore, MemoryStore, StorageResult};
use storefront_db::{Database, DbConfig, KvRepository};

/// Either the durable SQLite mirror or the in-process fallback.
#[derive(Debug, Clone)]
pub enum MirrorStore {
    Sqlite(KvRepository),
    Memory(MemoryStore),
}

impl MirrorStore {
    /// Opens the SQLite mirror at `path`, falling back to memory on failure.
    ///
    /// Returns the database handle too so the caller can close it on exit.
    pub async fn open(path: &Path) -> (Self, Option<Database>) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(?parent, error = %e, "Could not create data directory");
            }
        }

        match Database::new(DbConfig::new(path)).await {
            Ok(db) => {
                info!(?path, "Cart mirror opened");
                (MirrorStore::Sqlite(db.kv()), Some(db))
            }
            Err(e) => {
                warn!(
                    ?path,
                    error = %e,
                    "Cart mirror unavailable, cart will not survive restart"
                );
                (MirrorStore::Memory(MemoryStore::new()), None)
            }
        }
    }

    /// True when writes are durable.
    pub fn is_durable(&self) -> bool {
        matches!(self, MirrorStore::Sqlite(_))
    }
}

impl KeyValueStore for MirrorStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            MirrorStore::Sqlite(repo) => repo.get(key).await,
            MirrorStore::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            MirrorStore::Sqlite(repo) => repo.set(key, value).await,
            MirrorStore::Memory(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        match self {
            MirrorStore::Sqlite(repo) => repo.remove(key).await,
            MirrorStore::Memory(store) => store.remove(key).await,
        }
    }
}
