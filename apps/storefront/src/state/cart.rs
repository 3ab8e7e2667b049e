//! # Cart State
//!
//! The live cart plus its durable mirror.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  View Action              Command                 Cart State Change     │
//! │  ───────────              ───────                 ─────────────────     │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_to_cart() ───────► push / quantity + 1  │
//! │                                                                         │
//! │  "+" / "-" ──────────────► increment / decrement ► quantity ± 1 (≥ 1)  │
//! │                                                                         │
//! │  "Remove" ───────────────► remove_from_cart() ──► items.retain(..)     │
//! │                                                                         │
//! │  "Clear" ────────────────► clear_cart() ────────► items.clear()        │
//! │                                                                         │
//! │  Every change that altered the items ──► storage.set(key, json)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! `CartState` wraps the store in `Arc<tokio::sync::Mutex<_>>`. The lock is
//! held across the storage write so two commands can never interleave their
//! snapshots.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use storefront_core::{
    Cart, CartLineItem, KeyValueStore, Money, Product, ProductId, StorageError, StorageResult,
};

// =============================================================================
// CartStore
// =============================================================================

/// The cart together with the store it mirrors itself into.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Rehydrates the cart from `storage`.
    ///
    /// A missing key yields an empty cart. A read failure or an unreadable
    /// snapshot also yields an empty cart, with a warning.
    pub async fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let cart = match Self::read_snapshot(&storage, &key).await {
            Ok(Some(cart)) => {
                debug!(key = %key, lines = cart.len(), "Cart rehydrated");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "Could not restore cart, starting empty");
                Cart::new()
            }
        };

        CartStore { cart, storage, key }
    }

    async fn read_snapshot(storage: &S, key: &str) -> StorageResult<Option<Cart>> {
        let Some(raw) = storage.get(key).await? else {
            return Ok(None);
        };

        let items: Vec<CartLineItem> =
            serde_json::from_str(&raw).map_err(|e| StorageError::corrupt(key, e))?;

        Ok(Some(Cart::from_items(items)))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `product`. Always persists.
    pub async fn add_to_cart(&mut self, product: Product) -> StorageResult<()> {
        let changed = self.cart.add_product(product);
        self.persist_if(changed).await
    }

    /// Removes the line for `id`; absent ids are a no-op.
    pub async fn remove_from_cart(&mut self, id: &ProductId) -> StorageResult<()> {
        let changed = self.cart.remove(id);
        self.persist_if(changed).await
    }

    pub async fn increment_quantity(&mut self, id: &ProductId) -> StorageResult<()> {
        let changed = self.cart.increment(id);
        self.persist_if(changed).await
    }

    /// Decrements the quantity for `id`, never below 1.
    pub async fn decrement_quantity(&mut self, id: &ProductId) -> StorageResult<()> {
        let changed = self.cart.decrement(id);
        self.persist_if(changed).await
    }

    pub async fn clear_cart(&mut self) -> StorageResult<()> {
        let changed = self.cart.clear();
        self.persist_if(changed).await
    }

    async fn persist_if(&self, changed: bool) -> StorageResult<()> {
        if changed {
            self.persist().await
        } else {
            Ok(())
        }
    }

    /// Writes the current items under the storage key.
    pub async fn persist(&self) -> StorageResult<()> {
        let snapshot = serde_json::to_string(self.cart.items())
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        self.storage.set(&self.key, &snapshot).await
    }

    // =========================================================================
    // Readers
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.cart.get(id)
    }

    /// Sum of quantities.
    pub fn cart_count(&self) -> u64 {
        self.cart.count()
    }

    /// Sum of price × quantity.
    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines
    pub item_count: usize,
    /// Sum of quantities (the badge number)
    pub cart_count: u64,
    pub cart_total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            cart_count: cart.count(),
            cart_total_cents: cart.total().cents(),
        }
    }
}

// =============================================================================
// Shared State
// =============================================================================

/// Shared handle to the cart store.
///
/// ## Usage
/// ```rust,ignore
/// let mut cart = cart_state.lock().await;
/// cart.add_to_cart(product).await?;
/// ```
#[derive(Debug)]
pub struct CartState<S> {
    inner: Arc<Mutex<CartStore<S>>>,
}

impl<S: KeyValueStore> CartState<S> {
    pub fn new(store: CartStore<S>) -> Self {
        CartState {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Loads the store and wraps it.
    pub async fn load(storage: S, key: impl Into<String>) -> Self {
        Self::new(CartStore::load(storage, key).await)
    }

    /// Acquires exclusive access to the cart.
    pub async fn lock(&self) -> MutexGuard<'_, CartStore<S>> {
        self.inner.lock().await
    }
}

impl<S> Clone for CartState<S> {
    fn clone(&self) -> Self {
        CartState {
            inner: Arc::clone(&self.inner),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
