//! Data models
//!
//! Shared between the REST client and the catalog controller (via API).
//! IDs are document ids as strings; the backend may send them as `_id`.

pub mod category;
pub mod product;

// Re-exports
pub use category::*;
pub use product::*;
