use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Default cache TTL: 24 hours
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

/// Price label used when the lookup result carries none
const FREE_PRICE_LABEL: &str = "Free";

/// The platform an app runs on, derived from the lookup `kind` code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "software")]
    Ios,
    #[serde(rename = "mac-software")]
    Macos,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Platform {
    /// Derive the platform from a raw `kind` code
    pub fn from_kind(kind: Option<&str>) -> Self {
        match kind {
            Some("software") => Self::Ios,
            Some("mac-software") => Self::Macos,
            _ => Self::Unknown,
        }
    }
}

/// A single app from the developer's store catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub icon_url: String,
    pub store_url: String,
    pub bundle_id: String,
    pub price: String,
    pub genres: Vec<String>,
    pub average_rating: Option<f64>,
    pub rating_count: Option<u64>,
    pub platform: Platform,
}

impl AppRecord {
    /// The store review URL for this app
    pub fn review_url(&self) -> String {
        format!("https://apps.apple.com/app/id{}?action=write-review", self.id)
    }

    /// A shareable store URL without tracking parameters
    pub fn share_url(&self) -> String {
        format!("https://apps.apple.com/app/id{}", self.id)
    }
}

/// Which platforms to keep when partitioning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFilter {
    #[default]
    All,
    Ios,
    Macos,
}

impl PlatformFilter {
    /// Whether a record's platform passes this filter
    pub fn matches(&self, platform: Platform) -> bool {
        match self {
            Self::All => true,
            Self::Ios => platform == Platform::Ios,
            Self::Macos => platform == Platform::Macos,
        }
    }
}

/// Controls which elements the presentation layer renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show_rating: bool,
    pub show_price: bool,
    pub show_description: bool,
    pub max_count: Option<usize>,
}

impl DisplayOptions {
    /// Shows everything, no limit
    pub fn all() -> Self {
        Self::default()
    }

    /// Minimal: name and icon only
    pub fn minimal() -> Self {
        Self {
            show_rating: false,
            show_price: false,
            show_description: false,
            max_count: None,
        }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_rating: true,
            show_price: true,
            show_description: true,
            max_count: None,
        }
    }
}

/// Capability interface invoked when a consumer taps an app
pub trait TapHandler: Send + Sync {
    fn notify(&self, app: &AppRecord);
}

/// Active configuration for catalog retrieval and partitioning.
///
/// One config is active per service handle at a time; `configure` replaces it
/// wholesale, never merges.
#[derive(Clone)]
pub struct ShelfConfig {
    /// Developer identifier used for the lookup request
    pub developer_id: String,
    /// Bundle identifiers dropped from the "other apps" list
    pub exclude_bundle_ids: HashSet<String>,
    /// Platform filter applied when partitioning
    pub platform_filter: PlatformFilter,
    /// How long a cache entry stays fresh
    pub cache_ttl: Duration,
    /// Retry the lookup against "us" when the local region has no results
    pub region_fallback: bool,
    /// Extract the running product's own record as "current"
    pub show_current_app: bool,
    /// The running product's bundle identifier, if it has one
    pub own_bundle_id: Option<String>,
    /// Explicit country code; resolved from the locale environment when unset
    pub country: Option<String>,
    /// Presentation options, passed through to the display layer
    pub display: DisplayOptions,
    /// Invoked when a consumer taps an app
    pub on_app_tapped: Option<Arc<dyn TapHandler>>,
}

impl ShelfConfig {
    /// Create a config with defaults for everything but the developer id
    pub fn new(developer_id: impl Into<String>) -> Self {
        Self {
            developer_id: developer_id.into(),
            exclude_bundle_ids: HashSet::new(),
            platform_filter: PlatformFilter::All,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            region_fallback: true,
            show_current_app: false,
            own_bundle_id: None,
            country: None,
            display: DisplayOptions::all(),
            on_app_tapped: None,
        }
    }
}

impl fmt::Debug for ShelfConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShelfConfig")
            .field("developer_id", &self.developer_id)
            .field("exclude_bundle_ids", &self.exclude_bundle_ids)
            .field("platform_filter", &self.platform_filter)
            .field("cache_ttl", &self.cache_ttl)
            .field("region_fallback", &self.region_fallback)
            .field("show_current_app", &self.show_current_app)
            .field("own_bundle_id", &self.own_bundle_id)
            .field("country", &self.country)
            .field("display", &self.display)
            .field("on_app_tapped", &self.on_app_tapped.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Lookup service response envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub result_count: i64,
    pub results: Vec<LookupResult>,
}

/// One raw entry from the lookup service.
///
/// The service returns the developer's artist record alongside the software
/// entries; only software entries with all required fields map to records.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub wrapper_type: Option<String>,
    pub kind: Option<String>,
    pub track_id: Option<i64>,
    pub track_name: Option<String>,
    pub bundle_id: Option<String>,
    pub artwork_url512: Option<String>,
    pub artwork_url100: Option<String>,
    pub track_view_url: Option<String>,
    pub formatted_price: Option<String>,
    pub description: Option<String>,
    pub genres: Option<Vec<String>>,
    pub average_user_rating: Option<f64>,
    pub user_rating_count: Option<u64>,
}

impl LookupResult {
    fn is_software(&self) -> bool {
        self.wrapper_type.as_deref() == Some("software")
    }

    /// Map this raw entry to an [`AppRecord`].
    ///
    /// Returns `None` for non-software entries and for entries missing the
    /// identifier, name, bundle identifier, a usable icon URL, or the store
    /// listing URL; such entries are dropped, never an error.
    pub fn into_record(self) -> Option<AppRecord> {
        if !self.is_software() {
            return None;
        }

        let id = self.track_id?;
        let name = self.track_name?;
        let bundle_id = self.bundle_id?;
        let icon_url = self
            .artwork_url512
            .or(self.artwork_url100)
            .filter(|s| Url::parse(s).is_ok())?;
        let store_url = self.track_view_url.filter(|s| Url::parse(s).is_ok())?;

        let platform = Platform::from_kind(self.kind.as_deref());

        Some(AppRecord {
            id,
            name,
            description: self.description.unwrap_or_default(),
            icon_url,
            store_url,
            bundle_id,
            price: self
                .formatted_price
                .unwrap_or_else(|| FREE_PRICE_LABEL.to_string()),
            genres: self.genres.unwrap_or_default(),
            average_rating: self.average_user_rating,
            rating_count: self.user_rating_count,
            platform,
        })
    }
}
