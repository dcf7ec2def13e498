//! Concurrent catalog loading.
//!
//! A load round fetches products, best sellers and promotions at the same
//! time. A failed fetch degrades to an empty list (logged as a warning) so
//! the catalog still renders; the round's ticket decides whether each result
//! may replace what is already in [`CatalogState`].

use crate::client::StorefrontClient;
use crate::error::{ApiError, ApiResult};
use crate::state::{CatalogState, FetchTicket};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use storefront_search::{BestSellerEntry, Product, Promotion};
use tracing::{info, warn};

/// Where catalog data comes from.
pub trait CatalogSource {
    /// Full product list
    fn fetch_products(&self) -> impl Future<Output = ApiResult<Vec<Product>>> + Send;
    /// Best-seller report entries, ascending sales order
    fn fetch_best_sellers(&self) -> impl Future<Output = ApiResult<Vec<BestSellerEntry>>> + Send;
    /// Promotions, active or not
    fn fetch_promotions(&self) -> impl Future<Output = ApiResult<Vec<Promotion>>> + Send;
}

impl CatalogSource for StorefrontClient {
    async fn fetch_products(&self) -> ApiResult<Vec<Product>> {
        self.products().list().await
    }

    async fn fetch_best_sellers(&self) -> ApiResult<Vec<BestSellerEntry>> {
        self.best_sellers().list().await
    }

    async fn fetch_promotions(&self) -> ApiResult<Vec<Promotion>> {
        self.promotions().list().await
    }
}

/// What happened to one resource during a load round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// Fetched and applied
    Loaded {
        /// Items received
        count: usize,
    },
    /// Fetch failed; an empty list was applied instead
    Degraded {
        /// Failure description
        error: String,
    },
    /// A newer round already applied this resource
    Stale,
}

impl SourceOutcome {
    /// Whether fresh data was applied
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Summary of a load round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Round generation
    pub generation: u64,
    /// Product list outcome
    pub products: SourceOutcome,
    /// Best-seller list outcome
    pub best_sellers: SourceOutcome,
    /// Promotions outcome
    pub promotions: SourceOutcome,
}

impl LoadReport {
    /// Whether every resource loaded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.products.is_loaded() && self.best_sellers.is_loaded() && self.promotions.is_loaded()
    }
}

/// Loads catalog data from a source into shared state.
pub struct CatalogLoader<S> {
    source: S,
    state: Arc<CatalogState>,
}

impl<S: CatalogSource> CatalogLoader<S> {
    /// Create a loader writing into `state`
    pub fn new(source: S, state: Arc<CatalogState>) -> Self {
        Self { source, state }
    }

    /// State this loader writes into
    #[must_use]
    pub fn state(&self) -> &Arc<CatalogState> {
        &self.state
    }

    /// Run one load round.
    pub async fn load(&self) -> LoadReport {
        let ticket = self.state.begin();

        let (products, best_sellers, promotions) = tokio::join!(
            self.source.fetch_products(),
            self.source.fetch_best_sellers(),
            self.source.fetch_promotions(),
        );

        let report = LoadReport {
            generation: ticket.generation(),
            products: settle(ticket, "products", products, |t, v| {
                self.state.apply_products(t, v)
            }),
            best_sellers: settle(ticket, "best_sellers", best_sellers, |t, v| {
                self.state.apply_best_sellers(t, &v)
            }),
            promotions: settle(ticket, "promotions", promotions, |t, v| {
                self.state.apply_promotions(t, v)
            }),
        };

        info!(
            generation = report.generation,
            complete = report.is_complete(),
            "catalog load finished"
        );
        report
    }
}

/// Apply a fetch result, degrading failures to an empty list.
fn settle<T>(
    ticket: FetchTicket,
    resource: &str,
    fetched: ApiResult<Vec<T>>,
    apply: impl FnOnce(FetchTicket, Vec<T>) -> ApiResult<()>,
) -> SourceOutcome {
    let (items, outcome) = match fetched {
        Ok(items) => {
            let count = items.len();
            (items, SourceOutcome::Loaded { count })
        }
        Err(e) => {
            warn!(resource, generation = ticket.generation(), error = %e, "fetch failed, using empty list");
            (Vec::new(), SourceOutcome::Degraded { error: e.to_string() })
        }
    };

    match apply(ticket, items) {
        Ok(()) => outcome,
        Err(ApiError::StaleResponse { newest, .. }) => {
            warn!(resource, generation = ticket.generation(), newest, "discarding stale response");
            SourceOutcome::Stale
        }
        Err(e) => SourceOutcome::Degraded { error: e.to_string() },
    }
}
