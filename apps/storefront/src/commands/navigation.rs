//! # Navigation Commands

use tracing::debug;

use crate::error::ApiError;
use crate::routes::{self, RouteMatch};

/// Resolves a path to the view that should be shown.
///
/// ## Errors
/// `NOT_FOUND` for unknown paths
pub fn navigate(path: &str) -> Result<RouteMatch, ApiError> {
    debug!(path = %path, "navigate command");
    routes::resolve(path)
}
