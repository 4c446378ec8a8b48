//! Load orchestration: cache consult, fetch, stale fallback, bounded retries
//!
//! The async/recursive control flow of a UI view model is expressed here as
//! an explicit state machine with a cooperative cancel flag. Each UI surface
//! owns one orchestrator; all orchestrators may share one cache.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::CatalogCache;
use crate::catalog::{resolved_country_code, CatalogClient, ShelfConfig};
use crate::partition::{partition, Partitioned};

/// Bounded retry budget per load cycle
pub const MAX_RETRIES: u32 = 3;

/// Backoff schedule in seconds; consultations past the end reuse the last delay
const RETRY_DELAY_SECS: [u64; 3] = [2, 4, 8];

/// Externally observed state of a load cycle
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded(Partitioned),
    Failed,
}

impl LoadState {
    /// Whether the cycle reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed)
    }
}

/// Index-clamped backoff delay for a given retry count
fn backoff_delay(retry_count: u32, delays: &[Duration; 3]) -> Duration {
    delays[(retry_count as usize).min(delays.len() - 1)]
}

/// Coordinates the cache, the lookup client, and the partitioner for one
/// consumer surface.
///
/// Not reentrant across threads; methods take `&mut self`, which also keeps
/// at most one fetch in flight per instance. The shared cache handles its own
/// serialization.
pub struct LoadOrchestrator {
    config: ShelfConfig,
    client: CatalogClient,
    cache: Arc<CatalogCache>,
    country: String,
    state: LoadState,
    cycle_complete: bool,
    retry_count: u32,
    retry_delays: [Duration; 3],
    cancel: Arc<AtomicBool>,
}

impl LoadOrchestrator {
    /// Create an orchestrator over a shared cache.
    ///
    /// The country is resolved once, from the config override or the locale
    /// environment.
    pub fn new(config: ShelfConfig, client: CatalogClient, cache: Arc<CatalogCache>) -> Self {
        let country = config
            .country
            .clone()
            .unwrap_or_else(resolved_country_code);

        Self {
            config,
            client,
            cache,
            country,
            state: LoadState::Idle,
            cycle_complete: false,
            retry_count: 0,
            retry_delays: RETRY_DELAY_SECS.map(Duration::from_secs),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The externally observed load state
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The country code this orchestrator requests under
    pub fn country(&self) -> &str {
        &self.country
    }

    /// A flag the owner (e.g. UI teardown or a signal handler) can set to
    /// cancel the in-flight cycle. Honored at the suspension points only.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Run a load cycle once.
    ///
    /// No-op while a cycle is loading or after one has completed (`Loaded`
    /// or `Failed`) without an intervening [`retry`](Self::retry). A fresh
    /// cache hit completes the cycle without any network call.
    pub async fn load(&mut self) {
        if matches!(self.state, LoadState::Loading) || self.cycle_complete {
            return;
        }
        self.retry_count = 0;

        if let Some(cached) = self.cache.load(
            &self.config.developer_id,
            &self.country,
            self.config.cache_ttl,
        ) {
            debug!(count = cached.len(), "serving catalog from fresh cache");
            self.state = LoadState::Loaded(partition(&cached, &self.config));
            self.cycle_complete = true;
            return;
        }

        self.run_fetch_cycle().await;
    }

    /// Cancel any in-flight cycle, clear terminal state, and start a fresh
    /// cycle through the fetch path (the fresh-cache shortcut is bypassed
    /// because the caller explicitly asked for a reload).
    pub async fn retry(&mut self) {
        self.cancel.store(true, Ordering::SeqCst);
        self.cancel = Arc::new(AtomicBool::new(false));
        self.retry_count = 0;
        self.cycle_complete = false;
        self.run_fetch_cycle().await;
    }

    /// The fetch path: network, then stale fallback, then bounded retries.
    ///
    /// Cancellation is checked immediately after each suspension point; a
    /// cancelled cycle returns without any further state transition.
    async fn run_fetch_cycle(&mut self) {
        self.state = LoadState::Loading;

        loop {
            let result = self
                .client
                .fetch(
                    &self.config.developer_id,
                    &self.country,
                    self.config.region_fallback,
                )
                .await;

            if self.is_cancelled() {
                debug!("load cycle cancelled after fetch");
                return;
            }

            match result {
                Ok(records) => {
                    self.cache
                        .save(&records, &self.config.developer_id, &self.country);
                    info!(count = records.len(), "catalog loaded");
                    self.state = LoadState::Loaded(partition(&records, &self.config));
                    self.cycle_complete = true;
                    return;
                }
                Err(err) => {
                    warn!(error = %err, "catalog fetch failed");

                    if let Some(stale) = self.cache.load_stale(&self.config.developer_id) {
                        info!(count = stale.len(), "serving stale cache after fetch failure");
                        self.state = LoadState::Loaded(partition(&stale, &self.config));
                        self.cycle_complete = true;
                        return;
                    }

                    if self.retry_count < MAX_RETRIES {
                        let delay = backoff_delay(self.retry_count, &self.retry_delays);
                        self.retry_count += 1;
                        debug!(
                            attempt = self.retry_count,
                            delay_secs = delay.as_secs(),
                            "scheduling retry"
                        );
                        tokio::time::sleep(delay).await;
                        if self.is_cancelled() {
                            debug!("load cycle cancelled during backoff");
                            return;
                        }
                        continue;
                    }

                    warn!("retries exhausted with no stale data");
                    self.state = LoadState::Failed;
                    self.cycle_complete = true;
                    return;
                }
            }
        }
    }
}
