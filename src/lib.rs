//! Fetch, cache, and browse a developer's published App Store catalog.
//!
//! The pipeline: a single-slot two-tier [`cache`](CatalogCache) with TTL and
//! stale-fallback semantics, a [lookup client](CatalogClient) with single-hop
//! region fallback, a pure [partitioner](partition::partition), and a
//! [load orchestrator](LoadOrchestrator) with bounded retry and cooperative
//! cancellation. [`CatalogService`] is the configure/fetch facade for
//! consumers that do not need load states.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod partition;
pub mod service;

pub use cache::CatalogCache;
pub use catalog::{
    AppRecord, CatalogClient, DisplayOptions, Platform, PlatformFilter, ShelfConfig, TapHandler,
};
pub use error::{Result, ShelfError};
pub use loader::{LoadOrchestrator, LoadState};
pub use partition::{partition, Partitioned};
pub use service::CatalogService;
