//! # Cart
//!
//! The in-memory cart: an ordered list of line items plus derived aggregates.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  add_product(p)   id present? ── yes ──► quantity += 1                  │
//! │                        │                                                │
//! │                        no ─────────────► push {..p, quantity: 1}        │
//! │                                                                         │
//! │  remove(id)       present? ── yes ──► drop line       no ──► no-op      │
//! │  increment(id)    present? ── yes ──► quantity += 1   no ──► no-op      │
//! │  decrement(id)    quantity > 1 ────► quantity -= 1    else ─► no-op     │
//! │  clear()          items = []                                            │
//! │                                                                         │
//! │  count() = Σ quantity          total() = Σ price × quantity             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation returns whether the item list changed, so the owner can
//! decide whether the durable mirror needs a write.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartLineItem, Product, ProductId};

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per `ProductId`
/// - Every line has `quantity >= 1`
/// - Lines keep the order in which their product was first added
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from a stored snapshot, repairing broken invariants.
    ///
    /// - Duplicate ids are merged into the first occurrence (quantities
    ///   summed, the first line's price and attributes win)
    /// - A quantity of 0 is raised to 1
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Cart::new();

        for mut item in items {
            item.quantity = item.quantity.max(1);
            match cart.line_mut(item.id()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => cart.items.push(item),
            }
        }

        cart
    }

    /// Adds one unit of a product.
    ///
    /// If the id is already in the cart only its quantity changes. The stored
    /// price and attributes stay as they were when the line was created.
    pub fn add_product(&mut self, product: Product) -> bool {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(CartLineItem::from_product(product));
        }
        true
    }

    /// Removes the line for `id`. Returns false if it was not in the cart.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|line| line.id() != id);
        self.items.len() != initial_len
    }

    /// Adds one to the quantity of `id`, if present.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.line_mut(id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Subtracts one from the quantity of `id`, never going below 1.
    ///
    /// Use [`Cart::remove`] to take a line out of the cart.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        match self.line_mut(id) {
            Some(line) if line.quantity > 1 => {
                line.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Empties the cart. Returns false if it was already empty.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    /// Line items in first-added order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up the line for `id`.
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.id() == id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (the badge number in the header).
    pub fn count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price × quantity over all lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|line| line.id() == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
