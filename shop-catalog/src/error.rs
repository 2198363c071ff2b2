//! Catalog error types

use thiserror::Error;

/// Catalog controller error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The controller task is no longer running
    #[error("Catalog controller has stopped")]
    Closed,

    /// Unrecognised sort option name
    #[error("Unknown sort option: {0}")]
    InvalidSortOption(String),

    /// Unrecognised price bound name
    #[error("Unknown price bound: {0} (expected min or max)")]
    InvalidPriceBound(String),

    /// Unparseable console input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
