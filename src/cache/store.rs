//! Single-slot catalog cache, memory tier over a persisted JSON document

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::CacheEntryStatus;
use crate::catalog::AppRecord;

/// The persisted cache document.
///
/// One slot per cache instance: a save unconditionally replaces whatever was
/// here before, regardless of developer identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    records: Vec<AppRecord>,
    timestamp: DateTime<Utc>,
    country: String,
    developer_id: String,
}

impl CacheEntry {
    fn age(&self) -> chrono::Duration {
        Utc::now() - self.timestamp
    }

    fn is_valid(&self, developer_id: &str, country: &str, max_age: Duration) -> bool {
        let max_age = match chrono::Duration::from_std(max_age) {
            Ok(d) => d,
            Err(_) => chrono::Duration::MAX,
        };
        self.developer_id == developer_id && self.country == country && self.age() < max_age
    }
}

/// Two-tier cache for the most recently fetched catalog.
///
/// All operations serialize through one lock, held across the disk I/O, so
/// concurrent callers sharing a cache never observe a torn entry. Disk
/// failures degrade the cache to memory-only; they are never surfaced.
pub struct CatalogCache {
    slot: Mutex<Option<CacheEntry>>,
    cache_file: PathBuf,
}

impl CatalogCache {
    /// Create a cache persisting to `catalog.json` under the given directory
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            slot: Mutex::new(None),
            cache_file: cache_dir.join("catalog.json"),
        }
    }

    /// Return the cached records if they match the developer and country and
    /// are younger than `max_age`.
    ///
    /// Consults the memory tier first; on a memory miss a valid persisted
    /// entry is promoted into memory before being returned.
    pub fn load(
        &self,
        developer_id: &str,
        country: &str,
        max_age: Duration,
    ) -> Option<Vec<AppRecord>> {
        let mut slot = self.slot.lock().unwrap();

        if let Some(entry) = slot.as_ref() {
            if entry.is_valid(developer_id, country, max_age) {
                return Some(entry.records.clone());
            }
        }

        let entry = self.read_disk()?;
        if entry.is_valid(developer_id, country, max_age) {
            let records = entry.records.clone();
            debug!("promoted persisted cache entry into memory");
            *slot = Some(entry);
            return Some(records);
        }

        None
    }

    /// Return the cached records for the developer regardless of age or
    /// country (offline fallback; data captured under another region is
    /// considered better than none).
    pub fn load_stale(&self, developer_id: &str) -> Option<Vec<AppRecord>> {
        let slot = self.slot.lock().unwrap();

        if let Some(entry) = slot.as_ref() {
            if entry.developer_id == developer_id {
                return Some(entry.records.clone());
            }
        }

        self.read_disk()
            .filter(|entry| entry.developer_id == developer_id)
            .map(|entry| entry.records)
    }

    /// Replace the slot with a new entry stamped now.
    ///
    /// Overwrites both tiers unconditionally; a failed disk write leaves the
    /// memory tier in place and is only logged.
    pub fn save(&self, records: &[AppRecord], developer_id: &str, country: &str) {
        let entry = CacheEntry {
            records: records.to_vec(),
            timestamp: Utc::now(),
            country: country.to_string(),
            developer_id: developer_id.to_string(),
        };

        let mut slot = self.slot.lock().unwrap();
        self.write_disk(&entry);
        *slot = Some(entry);
    }

    /// Remove both tiers; idempotent
    pub fn clear(&self) {
        let mut slot = self.slot.lock().unwrap();
        *slot = None;
        if self.cache_file.exists() {
            if let Err(e) = std::fs::remove_file(&self.cache_file) {
                warn!(error = %e, "failed to remove cache file");
            }
        }
    }

    /// Status of the persisted slot, for diagnostics
    pub fn status(&self) -> CacheEntryStatus {
        let _slot = self.slot.lock().unwrap();

        if !self.cache_file.exists() {
            return CacheEntryStatus {
                exists: false,
                age_secs: None,
                count: None,
            };
        }

        match self.read_disk() {
            Some(entry) => CacheEntryStatus {
                exists: true,
                age_secs: Some(entry.age().num_seconds().max(0) as u64),
                count: Some(entry.records.len()),
            },
            None => CacheEntryStatus {
                exists: true,
                age_secs: None,
                count: None,
            },
        }
    }

    /// Read the persisted entry; absence or corruption is a miss, never an error
    fn read_disk(&self) -> Option<CacheEntry> {
        let data = std::fs::read_to_string(&self.cache_file).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Write the entry atomically: temp file in the same directory, then rename
    fn write_disk(&self, entry: &CacheEntry) {
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.cache_file.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string(entry)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            let tmp = self.cache_file.with_extension("json.tmp");
            std::fs::write(&tmp, json)?;
            std::fs::rename(&tmp, &self.cache_file)
        })();

        if let Err(e) = result {
            warn!(error = %e, "cache write failed, keeping memory entry only");
        }
    }
}
