//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Bad input at the product / route boundary       │
//! │  └── StorageError     - Durable storage mirror failures                 │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - SQLite failures, converted to StorageError      │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the shell / views see (serialized)         │
//! │                                                                         │
//! │  Flow: DbError → StorageError → CoreError → ApiError → View            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Cart operations that target an absent product id resolve as no-ops.
//! There is deliberately no "not in cart" variant here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised at the boundary where untyped input becomes domain types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product payload could not be read as a product.
    ///
    /// ## When This Occurs
    /// - Payload is not a JSON object
    /// - `id` or `price` has the wrong JSON type (e.g. a string price)
    ///
    /// Missing `id`/`price` fields are NOT errors; they default to zero.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// A product identifier could not be parsed (e.g. `/products/abc`).
    #[error("Invalid product id: {0}")]
    InvalidProductId(String),

    /// The durable storage mirror failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Storage Error
// =============================================================================

/// Failures of the durable key-value storage mirror.
///
/// These are always recoverable: the cart keeps its in-memory state (or
/// starts empty on load) and the caller logs the error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    ///
    /// ## When This Occurs
    /// - Database file cannot be opened
    /// - Disk full / quota exceeded
    /// - Lock poisoned in the in-memory store
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A stored value exists but cannot be decoded.
    #[error("Stored value under '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

impl StorageError {
    /// Creates a Corrupt error for a key.
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        StorageError::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidProductId("abc".to_string());
        assert_eq!(err.to_string(), "Invalid product id: abc");

        let err = StorageError::corrupt("online-store-cart", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "Stored value under 'online-store-cart' is corrupt: expected value at line 1"
        );
    }

    #[test]
    fn test_storage_converts_to_core_error() {
        let storage_err = StorageError::Unavailable("disk full".to_string());
        let core_err: CoreError = storage_err.into();
        assert!(matches!(core_err, CoreError::Storage(_)));
    }
}
