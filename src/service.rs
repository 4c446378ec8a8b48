//! Consumer-facing facade over the catalog pipeline
//!
//! The data-only path: a direct cache-or-fetch without the retry state
//! machine. Consumers wanting load states and failure recovery build a
//! [`LoadOrchestrator`] via [`CatalogService::make_loader`].

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::cache::CatalogCache;
use crate::catalog::{resolved_country_code, AppRecord, CatalogClient, ShelfConfig};
use crate::error::{Result, ShelfError};
use crate::loader::LoadOrchestrator;

/// Entry point for configuration and raw data access.
///
/// Holds at most one active config; `configure` replaces it wholesale.
pub struct CatalogService {
    config: Option<ShelfConfig>,
    client: CatalogClient,
    cache: Arc<CatalogCache>,
}

impl CatalogService {
    /// Create an unconfigured service caching under the given directory
    pub fn new(cache_dir: &Path) -> Result<Self> {
        Ok(Self::with_client(
            CatalogClient::new()?,
            Arc::new(CatalogCache::new(cache_dir)),
        ))
    }

    /// Create a service over an explicit client and shared cache
    pub fn with_client(client: CatalogClient, cache: Arc<CatalogCache>) -> Self {
        Self {
            config: None,
            client,
            cache,
        }
    }

    /// Replace the active configuration wholesale
    pub fn configure(&mut self, config: ShelfConfig) {
        debug!(developer_id = %config.developer_id, "service configured");
        self.config = Some(config);
    }

    /// The active configuration, if any
    pub fn config(&self) -> Option<&ShelfConfig> {
        self.config.as_ref()
    }

    fn require_config(&self) -> Result<&ShelfConfig> {
        self.config.as_ref().ok_or(ShelfError::NotConfigured)
    }

    /// Fetch the configured developer's catalog, raw and unpartitioned.
    ///
    /// Serves a fresh cache entry when one exists; otherwise fetches and
    /// writes through the cache. No retries; errors surface immediately and
    /// an empty catalog is returned as an empty list, not an error.
    pub async fn fetch_apps(&self) -> Result<Vec<AppRecord>> {
        let config = self.require_config()?;
        let country = config
            .country
            .clone()
            .unwrap_or_else(resolved_country_code);

        if let Some(cached) =
            self.cache
                .load(&config.developer_id, &country, config.cache_ttl)
        {
            return Ok(cached);
        }

        let records = self
            .client
            .fetch(&config.developer_id, &country, config.region_fallback)
            .await?;
        self.cache.save(&records, &config.developer_id, &country);

        Ok(records)
    }

    /// Fetch the catalog bypassing the fresh-cache consult.
    ///
    /// The result still writes through the cache.
    pub async fn refresh_apps(&self) -> Result<Vec<AppRecord>> {
        let config = self.require_config()?;
        let country = config
            .country
            .clone()
            .unwrap_or_else(resolved_country_code);

        let records = self
            .client
            .fetch(&config.developer_id, &country, config.region_fallback)
            .await?;
        self.cache.save(&records, &config.developer_id, &country);

        Ok(records)
    }

    /// Discover the running product's own record from the catalog.
    ///
    /// `None` when unconfigured, when no own bundle identifier is set, when
    /// the app is not (yet) published, or when the fetch fails.
    pub async fn current_app(&self) -> Option<AppRecord> {
        let own_bundle_id = self.config.as_ref()?.own_bundle_id.clone()?;
        let apps = self.fetch_apps().await.ok()?;
        apps.into_iter().find(|app| app.bundle_id == own_bundle_id)
    }

    /// Clear the cached catalog
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Invoke the configured tap handler for a record, if one is set
    pub fn notify_tapped(&self, app: &AppRecord) {
        if let Some(config) = &self.config {
            if let Some(handler) = &config.on_app_tapped {
                handler.notify(app);
            }
        }
    }

    /// Build a load orchestrator sharing this service's cache
    pub fn make_loader(&self) -> Result<LoadOrchestrator> {
        let config = self.require_config()?;
        Ok(LoadOrchestrator::new(
            config.clone(),
            self.client.clone(),
            Arc::clone(&self.cache),
        ))
    }
}
