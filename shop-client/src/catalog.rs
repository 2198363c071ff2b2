//! Catalog endpoints
//!
//! Product listing and category list, the two read paths the storefront
//! listing page depends on.

use crate::http::{HttpClient, NetworkHttpClient};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use shared::{ApiResponse, Category, ProductListData, ProductQuery, ProductSummary};

pub const PRODUCTS_PATH: &str = "products";
pub const CATEGORIES_PATH: &str = "categories";

/// Read access to the product catalog
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One page of products matching `query`
    async fn list_products(&self, query: &ProductQuery) -> ClientResult<Vec<ProductSummary>>;

    /// All categories
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;
}

/// Unwrap the envelope; `success: false` becomes [`ClientError::Api`]
fn unwrap_envelope<T>(resp: ApiResponse<T>) -> ClientResult<Option<T>> {
    resp.into_result().map_err(ClientError::api)
}

#[async_trait]
impl CatalogApi for NetworkHttpClient {
    async fn list_products(&self, query: &ProductQuery) -> ClientResult<Vec<ProductSummary>> {
        tracing::debug!(params = ?query.to_pairs(), "GET {}", PRODUCTS_PATH);
        let resp: ApiResponse<ProductListData> = self.get_with_query(PRODUCTS_PATH, query).await?;
        Ok(unwrap_envelope(resp)?.unwrap_or_default().products)
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let resp: ApiResponse<Vec<Category>> = self.get(CATEGORIES_PATH).await?;
        Ok(unwrap_envelope(resp)?.unwrap_or_default())
    }
}
