//! Best-seller list endpoint
//!
//! The route serves the ABC sales report in ascending sales order; callers
//! build a [`storefront_search::ReferenceList`] from it, which reverses the
//! entries.

use crate::client::StorefrontClient;
use crate::error::ApiResult;
use storefront_search::BestSellerEntry;

/// Best-seller list API
#[derive(Clone)]
pub struct BestSellersApi {
    client: StorefrontClient,
}

impl BestSellersApi {
    pub(crate) fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    /// Fetch the report entries as served
    ///
    /// # Errors
    /// See [`crate::ApiError`].
    pub async fn list(&self) -> ApiResult<Vec<BestSellerEntry>> {
        self.client.get(&self.client.config().best_sellers_path).await
    }
}
