//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore                                                             │
//! │       │                                                                 │
//! │       │  store.set("online-store-cart", "[...]")                       │
//! │       ▼                                                                 │
//! │  KvRepository  (impl KeyValueStore)                                    │
//! │  ├── fetch(&self, key)                                                 │
//! │  ├── upsert(&self, key, value)                                         │
//! │  └── delete(&self, key)                                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (kv_store table)                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - String key-value mirror

pub mod kv;
