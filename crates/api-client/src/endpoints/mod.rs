//! Endpoint-specific API implementations
//!
//! | Module | Storefront route | Payload |
//! |--------|------------------|---------|
//! | `products` | `GET /api/products` | product array |
//! | `best_sellers` | `GET /api/mais-vendidos` | `[{ "nome": ... }]`, ascending sales |
//! | `promotions` | `GET /api/admin/product-promotions` | promotion array |
//!
//! Paths are configurable through `[api]` in `.storefront.toml`. Every route
//! may answer bare or inside a `{ success, data, error }` envelope.

pub mod best_sellers;
pub mod products;
pub mod promotions;

pub use best_sellers::BestSellersApi;
pub use products::ProductsApi;
pub use promotions::PromotionsApi;
