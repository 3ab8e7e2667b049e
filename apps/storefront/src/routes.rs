//! # Route Resolution
//!
//! Maps paths to the three storefront views.
//!
//! ```text
//! /                  ──redirect──► /products
//! /products          ────────────► products        (listing)
//! /products/:id      ────────────► product-detail  (id: ProductId)
//! /checkout          ────────────► checkout
//! anything else      ────────────► NOT_FOUND
//! ```
//!
//! Paths must start with `/`. Query strings, fragments and a single trailing
//! slash are ignored; empty segments (`//products`) never match.
//!
//! The `:id` segment is an opaque product key: `/products/42` names the
//! numeric id 42 and `/products/sku-42` the string id "sku-42".

use serde::Serialize;

use storefront_core::ProductId;

use crate::error::ApiError;

/// A resolved view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum Route {
    Products,
    ProductDetail { id: ProductId },
    Checkout,
}

impl Route {
    /// Route name as the views know it.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Products => "products",
            Route::ProductDetail { .. } => "product-detail",
            Route::Checkout => "checkout",
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Products => "/products".to_string(),
            Route::ProductDetail { id } => format!("/products/{}", id),
            Route::Checkout => "/checkout".to_string(),
        }
    }
}

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatch {
    pub route: Route,
    pub path: String,
    /// The requested path, when a redirect was followed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
}

/// Resolves `path` to a route.
///
/// ## Errors
/// `NOT_FOUND` for anything but the four routed shapes, including relative
/// paths and paths with empty segments.
pub fn resolve(path: &str) -> Result<RouteMatch, ApiError> {
    let not_found = || ApiError::not_found("Route", path);

    let trimmed = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let relative = trimmed.strip_prefix('/').ok_or_else(not_found)?;
    let relative = relative.strip_suffix('/').unwrap_or(relative);

    let segments: Vec<&str> = if relative.is_empty() {
        Vec::new()
    } else {
        relative.split('/').collect()
    };
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(not_found());
    }

    let (route, redirected_from) = match segments.as_slice() {
        [] => (Route::Products, Some("/".to_string())),
        ["products"] => (Route::Products, None),
        ["products", id] => {
            let id: ProductId = id.parse().map_err(|_| not_found())?;
            (Route::ProductDetail { id }, None)
        }
        ["checkout"] => (Route::Checkout, None),
        _ => return Err(not_found()),
    };

    Ok(RouteMatch {
        path: route.path(),
        route,
        redirected_from,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_root_redirects_to_products() {
        let m = resolve("/").unwrap();
        assert_eq!(m.route, Route::Products);
        assert_eq!(m.path, "/products");
        assert_eq!(m.redirected_from.as_deref(), Some("/"));
    }

    #[test]
    fn test_named_routes() {
        assert_eq!(resolve("/products").unwrap().route.name(), "products");
        assert_eq!(resolve("/checkout/").unwrap().route, Route::Checkout);

        let m = resolve("/products/42?ref=home").unwrap();
        assert_eq!(m.route, Route::ProductDetail { id: ProductId::from(42) });
        assert_eq!(m.path, "/products/42");
        assert!(m.redirected_from.is_none());

        let m = resolve("/products/sku-42/").unwrap();
        assert_eq!(m.route, Route::ProductDetail { id: ProductId::from("sku-42") });
        assert_eq!(m.path, "/products/sku-42");
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        for path in [
            "/cart",
            "/products/1/reviews",
            "checkout",
            "products/1",
            "//products",
            "/products//",
            "/checkout//",
            "",
        ] {
            let err = resolve(path).unwrap_err();
            assert_eq!(err.code, ErrorCode::NotFound, "{}", path);
        }
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(resolve("/products/7").unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "route": { "name": "product-detail", "id": 7 },
                "path": "/products/7"
            })
        );
    }
}
