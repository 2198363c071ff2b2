//! Shared types for the storefront
//!
//! Wire types used by both the REST client and the catalog controller:
//! the JSON response envelope and the catalog/account models.

pub mod client;
pub mod models;
pub mod query;
pub mod response;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use client::{UserInfo, UserRole};
pub use models::{Category, ProductImage, ProductListData, ProductSummary};
pub use query::{ProductQuery, SortDirection, SortKey};
pub use response::ApiResponse;
