//! # Domain Types
//!
//! Core domain types shared by the cart, the toast list and the views.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  CartLineItem   │   │     Toast       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  (product)      │   │  id (ToastId)   │       │
//! │  │  price (Money)  │   │  quantity ≥ 1   │   │  message        │       │
//! │  │  ...attributes  │   │                 │   │  duration_ms    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pass-Through Attributes
//! Views hand the cart whatever the catalog returned (name, image, rating,
//! ...). Only `id` and `price` are interpreted; every other JSON field is kept
//! verbatim and written back out with the cart snapshot.
//!
//! Interpretation is lenient. Ids may be numbers or strings, prices may be
//! any JSON number, and a field of the wrong type falls back to its default
//! instead of rejecting the record.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Product Identifier
// =============================================================================

/// Identifies a product in the catalog and, at most once, in the cart.
///
/// Catalogs use numeric ids or string SKUs, so the id is an opaque key that
/// keeps whichever JSON form it arrived in. `1` and `"1"` are different ids.
///
/// Reading is total: a missing or wrong-typed id (`null`, `true`, `[]`, ...)
/// becomes the default id `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(Number),
    Text(String),
}

impl ProductId {
    /// Reads an id from any JSON value.
    pub fn from_json_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => ProductId::Number(normalize_number(n)),
            Value::String(s) => ProductId::Text(s.clone()),
            _ => ProductId::default(),
        }
    }
}

/// Whole-valued floats (`3.0`) compare equal to the integer they name.
fn normalize_number(n: &Number) -> Number {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Number::from(f as i64)
        }
        _ => n.clone(),
    }
}

impl Default for ProductId {
    fn default() -> Self {
        ProductId::Number(Number::from(0))
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(ProductId::from_json_value(&value))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

/// Parses the `:id` segment of `/products/:id` or a shell argument.
///
/// A JSON number becomes a numeric id and a quoted JSON string becomes a
/// string id; any other text is taken as a string id verbatim.
impl FromStr for ProductId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidProductId(s.to_string()));
        }

        Ok(match serde_json::from_str::<Value>(trimmed) {
            Ok(value @ (Value::Number(_) | Value::String(_))) => {
                ProductId::from_json_value(&value)
            }
            _ => ProductId::Text(trimmed.to_string()),
        })
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId::Number(Number::from(id))
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as handed to "add to cart".
///
/// Reading never fails on field contents. A missing or wrong-typed `id` or
/// `price` becomes zero, producing a degenerate cart entry rather than a
/// failure, matching how the views treat the cart as a pass-through.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    #[serde(default)]
    #[ts(type = "number | string")]
    pub id: ProductId,

    /// Unit price. Major units on the wire (`19.99`), cents in memory.
    #[serde(default, with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub price: Money,

    /// Every other field of the catalog record (name, image, ...).
    #[serde(flatten)]
    #[ts(skip)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Creates a product with no extra attributes.
    pub fn new(id: impl Into<ProductId>, price: Money) -> Self {
        Product {
            id: id.into(),
            price,
            attributes: Map::new(),
        }
    }

    /// Adds a pass-through attribute (builder style).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Reads a product from a JSON object.
    ///
    /// ## Errors
    /// - `CoreError::InvalidProduct` if the payload is not JSON or not an
    ///   object. Field contents never cause an error.
    ///
    /// ```rust
    /// use storefront_core::{Money, Product, ProductId};
    ///
    /// let p = Product::from_json(r#"{"id": "sku-7", "price": 12.99, "name": "Mug"}"#).unwrap();
    /// assert_eq!(p.id, ProductId::from("sku-7"));
    /// assert_eq!(p.price, Money::from_cents(1299));
    /// assert_eq!(p.attributes["name"], "Mug");
    /// ```
    pub fn from_json(payload: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| CoreError::InvalidProduct(e.to_string()))?;

        if !value.is_object() {
            return Err(CoreError::InvalidProduct(
                "expected a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| CoreError::InvalidProduct(e.to_string()))
    }

    /// Returns a string attribute such as `name`, if present.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

fn default_quantity() -> u32 {
    1
}

/// Snapshot quantities are read leniently: fractions round, negatives clamp
/// to 0 (raised to 1 when the cart is rebuilt) and non-numbers become 1.
mod lenient_quantity {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(quantity: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(*quantity)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let Value::Number(n) = value else {
            return Ok(super::default_quantity());
        };

        Ok(match n.as_u64() {
            Some(q) => u32::try_from(q).unwrap_or(u32::MAX),
            None => n
                .as_f64()
                .filter(|q| q.is_finite())
                .map(|q| q.round().clamp(0.0, u32::MAX as f64) as u32)
                .unwrap_or_else(super::default_quantity),
        })
    }
}

/// One product entry in the cart with an aggregated quantity.
///
/// ## Snapshot Semantics
/// The product fields are frozen when the line is created. Adding the same
/// id again only bumps `quantity`; a newer price in the catalog does not
/// replace the stored one.
///
/// ## Serialized Shape
/// ```json
/// { "id": 1, "price": 10.5, "name": "Mug", "quantity": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,

    /// Always ≥ 1 while the line is in the cart.
    #[serde(default = "default_quantity", with = "lenient_quantity")]
    #[ts(type = "number")]
    pub quantity: u32,
}

impl CartLineItem {
    /// Creates a line with quantity 1 from a product.
    ///
    /// A pass-through attribute named `quantity` is dropped so the
    /// serialized record carries exactly one `quantity` key.
    pub fn from_product(mut product: Product) -> Self {
        product.attributes.remove("quantity");
        CartLineItem {
            product,
            quantity: 1,
        }
    }

    #[inline]
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.product.price
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Toast
// =============================================================================

/// Process-unique toast identifier. Never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ToastId(pub u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ToastId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ToastId)
    }
}

/// A transient notification in the visible list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Toast {
    pub id: ToastId,

    /// Display text.
    pub message: String,

    /// Milliseconds until auto-removal.
    pub duration_ms: u64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Toast {
    /// Creates a toast stamped with the current time.
    pub fn new(id: ToastId, message: impl Into<String>, duration: Duration) -> Self {
        Toast {
            id,
            message: message.into(),
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            created_at: Utc::now(),
        }
    }

    /// Auto-removal delay as a `Duration`.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_parsing() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::from(42));
        assert_eq!("abc".parse::<ProductId>().unwrap(), ProductId::from("abc"));
        assert_eq!(r#""42""#.parse::<ProductId>().unwrap(), ProductId::from("42"));
        assert_eq!(
            "-1".parse::<ProductId>().unwrap(),
            ProductId::Number(Number::from(-1))
        );
        assert!(matches!(
            "  ".parse::<ProductId>(),
            Err(CoreError::InvalidProductId(_))
        ));
    }

    #[test]
    fn test_product_id_keeps_json_form() {
        assert_ne!(ProductId::from(1), ProductId::from("1"));
        assert_eq!(serde_json::to_value(ProductId::from(1)).unwrap(), 1);
        assert_eq!(serde_json::to_value(ProductId::from("sku-1")).unwrap(), "sku-1");
        assert_eq!(ProductId::from_json_value(&serde_json::json!(3.0)), ProductId::from(3));
        assert_eq!(ProductId::from("sku-1").to_string(), "sku-1");
    }

    #[test]
    fn test_product_from_json_keeps_attributes() {
        let product =
            Product::from_json(r#"{"id": 1, "price": 10, "name": "Mug", "image": "mug.png"}"#)
                .unwrap();

        assert_eq!(product.id, ProductId::from(1));
        assert_eq!(product.price, Money::from_cents(1000));
        assert_eq!(product.attribute_str("name"), Some("Mug"));
        assert_eq!(product.attribute_str("image"), Some("mug.png"));
        assert!(!product.attributes.contains_key("id"));
        assert!(!product.attributes.contains_key("price"));
    }

    #[test]
    fn test_product_fractional_price_and_string_id() {
        let shirt = Product::from_json(r#"{"id":1,"price":19.99,"title":"Shirt"}"#).unwrap();
        assert_eq!(shirt.price, Money::from_cents(1999));
        assert_eq!(shirt.attribute_str("title"), Some("Shirt"));

        let sku = Product::from_json(r#"{"id":"sku-1","price":10}"#).unwrap();
        assert_eq!(sku.id, ProductId::from("sku-1"));
        assert_eq!(sku.price, Money::from_cents(1000));
    }

    #[test]
    fn test_product_missing_fields_is_degenerate_not_error() {
        let product = Product::from_json(r#"{"name": "Mystery"}"#).unwrap();
        assert_eq!(product.id, ProductId::default());
        assert!(product.price.is_zero());
    }

    #[test]
    fn test_product_wrong_field_types_degrade() {
        let product = Product::from_json(r#"{"id": true, "price": "ten", "name": "Odd"}"#).unwrap();
        assert_eq!(product.id, ProductId::default());
        assert!(product.price.is_zero());
        assert_eq!(product.attribute_str("name"), Some("Odd"));

        let nested = Product::from_json(r#"{"id": [1], "price": {"amount": 5}}"#).unwrap();
        assert_eq!(nested.id, ProductId::default());
        assert!(nested.price.is_zero());
    }

    #[test]
    fn test_product_rejects_non_objects() {
        assert!(matches!(
            Product::from_json("[1, 2]"),
            Err(CoreError::InvalidProduct(_))
        ));
        assert!(Product::from_json("not json").is_err());
    }

    #[test]
    fn test_line_item_serialized_shape() {
        let item = CartLineItem::from_product(
            Product::new(1, Money::from_cents(1000)).with_attribute("name", "Mug"),
        );

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["price"], 10);
        assert_eq!(value["name"], "Mug");
        assert_eq!(value["quantity"], 1);

        let fractional = CartLineItem::from_product(Product::new("sku", Money::from_cents(1999)));
        let value = serde_json::to_value(&fractional).unwrap();
        assert_eq!(value["id"], "sku");
        assert_eq!(value["price"], 19.99);
    }

    #[test]
    fn test_line_item_drops_quantity_attribute() {
        let product = Product::new(3, Money::from_cents(5)).with_attribute("quantity", 99);
        let item = CartLineItem::from_product(product);

        assert_eq!(item.quantity, 1);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json.matches("\"quantity\"").count(), 1);
    }

    #[test]
    fn test_line_item_roundtrip_through_snapshot() {
        let json = r#"{"id": 2, "price": 5, "name": "Pen", "quantity": 3}"#;
        let item: CartLineItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id(), &ProductId::from(2));
        assert_eq!(item.quantity, 3);
        assert_eq!(item.product.attribute_str("name"), Some("Pen"));
        assert!(!item.product.attributes.contains_key("quantity"));
        assert_eq!(item.line_total(), Money::from_cents(1500));
    }

    #[test]
    fn test_line_item_lenient_quantity() {
        let rounded: CartLineItem = serde_json::from_str(r#"{"id": 1, "quantity": 2.4}"#).unwrap();
        assert_eq!(rounded.quantity, 2);

        let text: CartLineItem = serde_json::from_str(r#"{"id": 1, "quantity": "2"}"#).unwrap();
        assert_eq!(text.quantity, 1);

        let negative: CartLineItem = serde_json::from_str(r#"{"id": 1, "quantity": -3}"#).unwrap();
        assert_eq!(negative.quantity, 0);
    }

    #[test]
    fn test_toast_duration() {
        let toast = Toast::new(ToastId(0), "Saved", Duration::from_millis(3000));
        assert_eq!(toast.duration_ms, 3000);
        assert_eq!(toast.duration(), Duration::from_secs(3));

        let value = serde_json::to_value(&toast).unwrap();
        assert_eq!(value["durationMs"], 3000);
        assert_eq!(value["message"], "Saved");
    }
}
