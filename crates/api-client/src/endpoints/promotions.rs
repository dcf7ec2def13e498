//! Promotions endpoint

use crate::client::StorefrontClient;
use crate::error::ApiResult;
use storefront_search::Promotion;

/// Promotions API
#[derive(Clone)]
pub struct PromotionsApi {
    client: StorefrontClient,
}

impl PromotionsApi {
    pub(crate) fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    /// Fetch every promotion, active or not
    ///
    /// # Errors
    /// See [`crate::ApiError`].
    pub async fn list(&self) -> ApiResult<Vec<Promotion>> {
        self.client.get(&self.client.config().promotions_path).await
    }
}
