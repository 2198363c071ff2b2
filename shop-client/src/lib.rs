//! Shop Client - HTTP client for the storefront REST API
//!
//! Provides network-based HTTP calls to the catalog endpoints.

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use catalog::CatalogApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::Session;

// Re-export shared types for convenience
pub use shared::{ApiResponse, Category, ProductQuery, ProductSummary, UserInfo};
