//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                        │
//! │  │  Cart    │     │          │     │  view    │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   increment / decrement                                 │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed snapshot write never fails the command: the cart has already
//! changed in memory, so the warning is logged and the new cart returned.

use serde::Serialize;
use tracing::{debug, warn};

use storefront_core::{CartLineItem, KeyValueStore, Product, ProductId, StorageResult};

use crate::error::ApiError;
use crate::state::{AppConfig, CartState, CartStore, CartTotals};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
    /// `totals.cart_total_cents` formatted with the configured currency.
    pub total_display: String,
}

impl CartResponse {
    fn build<S: KeyValueStore>(store: &CartStore<S>, config: &AppConfig) -> Self {
        CartResponse {
            items: store.items().to_vec(),
            totals: CartTotals::from(store.cart()),
            total_display: config.format_currency(store.cart_total()),
        }
    }
}

fn log_persist_failure(operation: &str, result: StorageResult<()>) {
    if let Err(e) = result {
        warn!(operation, error = %e, "Cart changed but snapshot was not saved");
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and calculated totals
pub async fn get_cart<S: KeyValueStore>(cart: &CartState<S>, config: &AppConfig) -> CartResponse {
    debug!("get_cart command");
    let store = cart.lock().await;
    CartResponse::build(&store, config)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases by 1
/// - If product not in cart: appended with quantity 1
/// - The first snapshot of a product wins (later prices are ignored)
///
/// ## Arguments
/// * `product_json` - A JSON object with `id`, `price` and any display fields
///
/// ## Errors
/// `VALIDATION_ERROR` if the payload is not a product object
pub async fn add_to_cart<S: KeyValueStore>(
    cart: &CartState<S>,
    config: &AppConfig,
    product_json: &str,
) -> Result<CartResponse, ApiError> {
    let product = Product::from_json(product_json)?;
    debug!(product_id = %product.id, "add_to_cart command");

    let mut store = cart.lock().await;
    log_persist_failure("add_to_cart", store.add_to_cart(product).await);
    Ok(CartResponse::build(&store, config))
}

/// Removes a line from the cart. Absent ids are a no-op.
pub async fn remove_from_cart<S: KeyValueStore>(
    cart: &CartState<S>,
    config: &AppConfig,
    product_id: ProductId,
) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    let mut store = cart.lock().await;
    log_persist_failure("remove_from_cart", store.remove_from_cart(&product_id).await);
    CartResponse::build(&store, config)
}

/// Adds one to a line's quantity.
pub async fn increment_quantity<S: KeyValueStore>(
    cart: &CartState<S>,
    config: &AppConfig,
    product_id: ProductId,
) -> CartResponse {
    debug!(product_id = %product_id, "increment_quantity command");

    let mut store = cart.lock().await;
    log_persist_failure(
        "increment_quantity",
        store.increment_quantity(&product_id).await,
    );
    CartResponse::build(&store, config)
}

/// Subtracts one from a line's quantity, stopping at 1.
pub async fn decrement_quantity<S: KeyValueStore>(
    cart: &CartState<S>,
    config: &AppConfig,
    product_id: ProductId,
) -> CartResponse {
    debug!(product_id = %product_id, "decrement_quantity command");

    let mut store = cart.lock().await;
    log_persist_failure(
        "decrement_quantity",
        store.decrement_quantity(&product_id).await,
    );
    CartResponse::build(&store, config)
}

/// Clears all items from the cart.
pub async fn clear_cart<S: KeyValueStore>(cart: &CartState<S>, config: &AppConfig) -> CartResponse {
    debug!("clear_cart command");

    let mut store = cart.lock().await;
    log_persist_failure("clear_cart", store.clear_cart().await);
    CartResponse::build(&store, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{MemoryStore, StorageError};

    async fn test_cart() -> (CartState<MemoryStore>, MemoryStore) {
        let storage = MemoryStore::new();
        let state = CartState::load(storage.clone(), "online-store-cart").await;
        (state, storage)
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let (cart, _) = test_cart().await;
        let config = AppConfig::default();

        add_to_cart(&cart, &config, r#"{"id":1,"price":10,"name":"Mug"}"#)
            .await
            .unwrap();
        let response = add_to_cart(&cart, &config, r#"{"id":1,"price":1}"#)
            .await
            .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.cart_count, 2);
        assert_eq!(response.totals.cart_total_cents, 2000);
        assert_eq!(response.total_display, "$20.00");

        let fetched = get_cart(&cart, &config).await;
        assert_eq!(fetched.items, response.items);
    }

    #[tokio::test]
    async fn test_add_fractional_price_and_string_id() {
        let (cart, _) = test_cart().await;
        let config = AppConfig::default();

        add_to_cart(&cart, &config, r#"{"id":1,"price":19.99,"title":"Shirt"}"#)
            .await
            .unwrap();
        let response = add_to_cart(&cart, &config, r#"{"id":"sku-1","price":10}"#)
            .await
            .unwrap();

        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[1].id(), &ProductId::from("sku-1"));
        assert_eq!(response.totals.cart_total_cents, 2999);
        assert_eq!(response.total_display, "$29.99");

        let response = increment_quantity(&cart, &config, "sku-1".parse().unwrap()).await;
        assert_eq!(response.totals.cart_count, 3);
    }

    #[tokio::test]
    async fn test_invalid_payload_is_validation_error() {
        let (cart, storage) = test_cart().await;
        let config = AppConfig::default();

        let err = add_to_cart(&cart, &config, "[1,2]").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_quantity_commands() {
        let (cart, _) = test_cart().await;
        let config = AppConfig::default();
        add_to_cart(&cart, &config, r#"{"id":5,"price":250}"#)
            .await
            .unwrap();

        let response = increment_quantity(&cart, &config, ProductId::from(5)).await;
        assert_eq!(response.totals.cart_count, 2);

        decrement_quantity(&cart, &config, ProductId::from(5)).await;
        let response = decrement_quantity(&cart, &config, ProductId::from(5)).await;
        assert_eq!(response.totals.cart_count, 1);

        let response = remove_from_cart(&cart, &config, ProductId::from(5)).await;
        assert!(response.items.is_empty());
        assert_eq!(response.total_display, "$0.00");
    }

    #[tokio::test]
    async fn test_clear_and_response_shape() {
        let (cart, storage) = test_cart().await;
        let config = AppConfig::default();
        add_to_cart(&cart, &config, r#"{"id":1,"price":10}"#)
            .await
            .unwrap();

        let response = clear_cart(&cart, &config).await;
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [],
                "totals": { "itemCount": 0, "cartCount": 0, "cartTotalCents": 0 },
                "totalDisplay": "$0.00"
            })
        );
        assert_eq!(
            storage.get("online-store-cart").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[derive(Debug, Clone)]
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }

        async fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_fail_command() {
        let cart = CartState::load(ReadOnlyStore, "online-store-cart").await;
        let config = AppConfig::default();

        let response = add_to_cart(&cart, &config, r#"{"id":1,"price":10}"#)
            .await
            .unwrap();
        assert_eq!(response.totals.cart_count, 1);
    }
}
