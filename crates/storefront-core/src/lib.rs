//! # storefront-core: Pure State Logic for the Storefront
//!
//! This crate holds the cart and toast domain as plain data and pure
//! functions. Anything that touches a disk, a database or a timer lives in
//! `storefront-db` or the app.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Views (product list / detail / checkout)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      apps/storefront: CartStore, ToastManager, routes           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  storage  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ KV trait  │  │   │
//! │  │   │  Toast    │  │           │  │           │  │ MemStore  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        storefront-db: SQLite implementation of the KV trait     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, CartLineItem, Toast and their identifiers
//! - [`money`] - Integer-cent money
//! - [`cart`] - The cart and its derived aggregates
//! - [`storage`] - Durable key-value storage boundary
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, Product, ProductId};
//!
//! let mut cart = Cart::new();
//! cart.add_product(Product::new(1, Money::from_cents(1000)));
//! cart.add_product(Product::new(1, Money::from_cents(1000)));
//! cart.add_product(Product::new(2, Money::from_cents(500)));
//!
//! assert_eq!(cart.count(), 3);
//! assert_eq!(cart.total().cents(), 2500);
//! assert_eq!(cart.get(&ProductId::from(1)).map(|l| l.quantity), Some(2));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod storage;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, StorageError, StorageResult};
pub use money::Money;
pub use storage::{KeyValueStore, MemoryStore};
pub use types::*;

use std::time::Duration;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart snapshot is mirrored under.
///
/// Changing it orphans every existing snapshot, so it is only overridable
/// through configuration, never at runtime.
pub const CART_STORAGE_KEY: &str = "online-store-cart";

/// How long a toast stays visible when the caller does not say.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);
