//! Configuration loading and schema definitions
//!
//! Settings shared by the CLI and the API client, read from
//! `.storefront.toml`.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_CANDIDATES};
pub use schema::*;
