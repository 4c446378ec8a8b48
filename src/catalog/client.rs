use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::types::{AppRecord, LookupResponse, LookupResult};
use crate::error::{Result, ShelfError};

const BASE_URL: &str = "https://itunes.apple.com";
const USER_AGENT: &str = concat!("appshelf/", env!("CARGO_PKG_VERSION"));

/// The region retried when the local region has no results
pub const FALLBACK_COUNTRY: &str = "us";

/// Client for the store lookup service
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client against the production lookup endpoint
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// Create a new client against an explicit endpoint (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch all apps published by a developer.
    ///
    /// Issues one lookup for `(developer_id, country)`. When the result set
    /// is empty, `region_fallback` is set, and the country is not already
    /// "us", issues exactly one more lookup against "us" and returns that
    /// result instead. The two result sets are never merged.
    pub async fn fetch(
        &self,
        developer_id: &str,
        country: &str,
        region_fallback: bool,
    ) -> Result<Vec<AppRecord>> {
        let records = self.lookup(developer_id, country).await?;

        if records.is_empty() && region_fallback && country != FALLBACK_COUNTRY {
            warn!(country, "empty catalog for region, retrying against us");
            return self.lookup(developer_id, FALLBACK_COUNTRY).await;
        }

        Ok(records)
    }

    /// Make one GET request to the lookup service and map the results
    async fn lookup(&self, developer_id: &str, country: &str) -> Result<Vec<AppRecord>> {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("id", developer_id)
            .append_pair("entity", "software")
            .append_pair("country", country)
            .finish();
        let url = format!("{}/lookup?{query}", self.base_url);

        debug!(developer_id, country, "looking up developer catalog");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ShelfError::api(status.as_u16(), message));
        }

        let body = response.text().await?;
        let envelope: LookupResponse = serde_json::from_str(&body)?;

        Ok(envelope
            .results
            .into_iter()
            .filter_map(LookupResult::into_record)
            .collect())
    }
}

/// Resolve the store country code from the locale environment.
///
/// Reads `LC_ALL`, `LC_MESSAGES`, then `LANG` (e.g. `en_GB.UTF-8` yields
/// "gb"); falls back to "us" when no region can be determined.
pub fn resolved_country_code() -> String {
    for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(code) = region_from_locale(&value) {
                return code;
            }
        }
    }
    FALLBACK_COUNTRY.to_string()
}

/// Extract the lowercased region from a POSIX locale string
fn region_from_locale(locale: &str) -> Option<String> {
    let tag = locale.split('.').next()?;
    let region = tag.split('_').nth(1)?;
    if region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(region.to_ascii_lowercase())
    } else {
        None
    }
}
