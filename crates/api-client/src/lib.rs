//! Storefront API client
//!
//! Fetches the catalog, the best-seller report and active promotions from
//! the storefront, and keeps them in a [`CatalogState`] that refuses stale
//! responses.
//!
//! # Features
//!
//! - **Environment-based configuration**: `STOREFRONT_*` variables over `.storefront.toml`
//! - **Retry with exponential backoff**: automatic retry for transient failures
//! - **Circuit breaker**: stop calling a storefront that keeps failing
//! - **Rate limiting**: per-endpoint token buckets
//! - **Envelope decoding**: bare and `{ success, data, error }` payloads become `Result`s
//! - **Generation tickets**: out-of-order responses never overwrite newer data
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_api_client::{CatalogLoader, CatalogState, StorefrontClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StorefrontClient::new()?;
//!     let state = Arc::new(CatalogState::new());
//!
//!     let report = CatalogLoader::new(client, Arc::clone(&state)).load().await;
//!     println!("generation {} complete: {}", report.generation, report.is_complete());
//!
//!     let products = state.priced_products();
//!     let hits = state.searcher(Default::default()).search("arroz", &products);
//!     println!("{} hits", hits.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod loader;
pub mod state;

pub use client::StorefrontClient;
pub use config::{ClientConfig, Environment};
pub use envelope::{Envelope, Payload};
pub use error::{ApiError, ApiResult};
pub use loader::{CatalogLoader, CatalogSource, LoadReport, SourceOutcome};
pub use state::{CatalogState, FetchTicket};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::StorefrontClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{BestSellersApi, ProductsApi, PromotionsApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::loader::{CatalogLoader, CatalogSource, LoadReport};
    pub use crate::state::{CatalogState, FetchTicket};
}
