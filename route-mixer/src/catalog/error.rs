//! Catalog error types.

use crate::domain::Location;

/// Errors that can occur when loading or probing the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Explicit existence check for a location the catalog has never seen
    #[error("unknown location: {0}")]
    UnknownLocation(Location),

    /// Reading the catalog document failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog document is not valid JSON for the expected shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
