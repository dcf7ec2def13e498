//! Product list endpoint

use crate::client::StorefrontClient;
use crate::error::ApiResult;
use storefront_search::Product;

/// Product list API
#[derive(Clone)]
pub struct ProductsApi {
    client: StorefrontClient,
}

impl ProductsApi {
    pub(crate) fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    /// Fetch the full catalog
    ///
    /// # Errors
    /// See [`crate::ApiError`].
    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        self.client.get(&self.client.config().products_path).await
    }
}
