mod client;
pub mod types;

pub use client::{resolved_country_code, CatalogClient, FALLBACK_COUNTRY};
pub use types::*;
