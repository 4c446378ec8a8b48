use std::collections::HashSet;
use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::Paths;
use crate::catalog::{DisplayOptions, PlatformFilter, ShelfConfig};
use crate::error::{Result, ShelfError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Catalog retrieval settings
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Display preferences
    #[serde(default)]
    pub display: DisplaySettings,

    /// Output preferences
    #[serde(default)]
    pub output: OutputSettings,
}

/// Catalog retrieval settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Developer identifier used for lookups
    pub developer_id: Option<String>,
    /// Explicit country code; resolved from the locale when unset
    pub country: Option<String>,
    /// Bundle identifiers excluded from listings
    #[serde(default)]
    pub exclude_bundle_ids: Vec<String>,
    /// Platform filter (all / ios / macos)
    #[serde(default)]
    pub platform_filter: PlatformFilter,
    /// Cache freshness window in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Retry the lookup against "us" when the local region is empty
    #[serde(default = "default_true")]
    pub region_fallback: bool,
    /// Extract the own app as "current" when listing
    #[serde(default)]
    pub show_current_app: bool,
    /// The own product's bundle identifier
    pub own_bundle_id: Option<String>,
}

fn default_cache_ttl_secs() -> u64 {
    crate::catalog::DEFAULT_CACHE_TTL_SECS
}

fn default_true() -> bool {
    true
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            developer_id: None,
            country: None,
            exclude_bundle_ids: Vec::new(),
            platform_filter: PlatformFilter::All,
            cache_ttl_secs: default_cache_ttl_secs(),
            region_fallback: true,
            show_current_app: false,
            own_bundle_id: None,
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_true")]
    pub show_rating: bool,
    #[serde(default = "default_true")]
    pub show_price: bool,
    #[serde(default = "default_true")]
    pub show_description: bool,
    pub max_count: Option<usize>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_rating: true,
            show_price: true,
            show_description: true,
            max_count: None,
        }
    }
}

/// Output formatting preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Settings {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let paths = Paths::new()?;
        Self::load_from(&paths)
    }

    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let settings: Settings = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let paths = Paths::new()?;
        self.save_to(&paths)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, &contents)?;
        Ok(())
    }

    /// Get the developer id or return an error with instructions
    pub fn require_developer_id(&self) -> Result<&str> {
        self.catalog
            .developer_id
            .as_deref()
            .ok_or(ShelfError::NotConfigured)
    }

    /// Set a configuration value by dotted key (e.g. `catalog.developer_id`)
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "catalog.developer_id" => self.catalog.developer_id = Some(value.to_string()),
            "catalog.country" => self.catalog.country = Some(value.to_lowercase()),
            "catalog.exclude_bundle_ids" => {
                self.catalog.exclude_bundle_ids = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            "catalog.platform_filter" => {
                self.catalog.platform_filter = match value {
                    "all" => PlatformFilter::All,
                    "ios" => PlatformFilter::Ios,
                    "macos" => PlatformFilter::Macos,
                    other => {
                        return Err(ShelfError::Config(format!(
                            "invalid platform filter '{other}' (expected all, ios, or macos)"
                        )))
                    }
                };
            }
            "catalog.cache_ttl_secs" => {
                self.catalog.cache_ttl_secs = value
                    .parse()
                    .map_err(|_| ShelfError::Config(format!("invalid TTL '{value}'")))?;
            }
            "catalog.region_fallback" => {
                self.catalog.region_fallback = parse_bool(key, value)?;
            }
            "catalog.show_current_app" => {
                self.catalog.show_current_app = parse_bool(key, value)?;
            }
            "catalog.own_bundle_id" => self.catalog.own_bundle_id = Some(value.to_string()),
            "output.format" => {
                if value != "pretty" && value != "json" {
                    return Err(ShelfError::Config(format!(
                        "invalid output format '{value}' (expected pretty or json)"
                    )));
                }
                self.output.format = value.to_string();
            }
            other => {
                return Err(ShelfError::Config(format!("unknown config key '{other}'")));
            }
        }
        Ok(())
    }

    /// Build the library config from these settings
    pub fn to_shelf_config(&self) -> Result<ShelfConfig> {
        let developer_id = self.require_developer_id()?.to_string();

        let mut config = ShelfConfig::new(developer_id);
        config.country = self.catalog.country.clone();
        config.exclude_bundle_ids = self
            .catalog
            .exclude_bundle_ids
            .iter()
            .cloned()
            .collect::<HashSet<_>>();
        config.platform_filter = self.catalog.platform_filter;
        config.cache_ttl = Duration::from_secs(self.catalog.cache_ttl_secs);
        config.region_fallback = self.catalog.region_fallback;
        config.show_current_app = self.catalog.show_current_app;
        config.own_bundle_id = self.catalog.own_bundle_id.clone();
        config.display = DisplayOptions {
            show_rating: self.display.show_rating,
            show_price: self.display.show_price,
            show_description: self.display.show_description,
            max_count: self.display.max_count,
        };

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| ShelfError::Config(format!("invalid boolean '{value}' for {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Create a test Paths instance using a temp directory
    fn make_test_paths(temp_dir: &TempDir) -> Paths {
        let root = temp_dir.path().to_path_buf();
        Paths {
            config_file: root.join("config.toml"),
            cache_dir: root.join("cache"),
            root,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Default Value Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.catalog.developer_id.is_none());
        assert_eq!(settings.catalog.cache_ttl_secs, 86_400);
        assert!(settings.catalog.region_fallback);
        assert!(!settings.catalog.show_current_app);
        assert_eq!(settings.output.format, "pretty");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load/Save Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_returns_default_when_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let settings = Settings::load_from(&paths).unwrap();
        assert!(settings.catalog.developer_id.is_none());
        assert_eq!(settings.output.format, "pretty");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let mut settings = Settings::default();
        settings.catalog.developer_id = Some("12345".to_string());
        settings.catalog.country = Some("fr".to_string());
        settings.catalog.exclude_bundle_ids = vec!["com.example.beta".to_string()];
        settings.catalog.platform_filter = PlatformFilter::Ios;
        settings.catalog.show_current_app = true;
        settings.output.format = "json".to_string();

        settings.save_to(&paths).unwrap();

        let loaded = Settings::load_from(&paths).unwrap();
        assert_eq!(loaded.catalog.developer_id, Some("12345".to_string()));
        assert_eq!(loaded.catalog.country, Some("fr".to_string()));
        assert_eq!(
            loaded.catalog.exclude_bundle_ids,
            vec!["com.example.beta".to_string()]
        );
        assert_eq!(loaded.catalog.platform_filter, PlatformFilter::Ios);
        assert!(loaded.catalog.show_current_app);
        assert_eq!(loaded.output.format, "json");
    }

    #[test]
    fn test_load_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::create_dir_all(&paths.root).unwrap();
        fs::write(
            &paths.config_file,
            r#"
[catalog]
developer_id = "98765"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&paths).unwrap();
        assert_eq!(settings.catalog.developer_id, Some("98765".to_string()));
        assert_eq!(settings.catalog.cache_ttl_secs, 86_400);
        assert!(settings.catalog.region_fallback);
        assert_eq!(settings.output.format, "pretty");
    }

    #[test]
    fn test_load_empty_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::create_dir_all(&paths.root).unwrap();
        fs::write(&paths.config_file, "").unwrap();

        let settings = Settings::load_from(&paths).unwrap();
        assert!(settings.catalog.developer_id.is_none());
        assert_eq!(settings.output.format, "pretty");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Require Methods Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_require_developer_id_when_present() {
        let mut settings = Settings::default();
        settings.catalog.developer_id = Some("123".to_string());

        assert_eq!(settings.require_developer_id().unwrap(), "123");
    }

    #[test]
    fn test_require_developer_id_when_missing() {
        let settings = Settings::default();
        let err = settings.require_developer_id().unwrap_err();
        assert!(matches!(err, ShelfError::NotConfigured));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Set Value Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_set_value_developer_id() {
        let mut settings = Settings::default();
        settings.set_value("catalog.developer_id", "4321").unwrap();
        assert_eq!(settings.catalog.developer_id, Some("4321".to_string()));
    }

    #[test]
    fn test_set_value_country_lowercases() {
        let mut settings = Settings::default();
        settings.set_value("catalog.country", "GB").unwrap();
        assert_eq!(settings.catalog.country, Some("gb".to_string()));
    }

    #[test]
    fn test_set_value_exclude_list() {
        let mut settings = Settings::default();
        settings
            .set_value("catalog.exclude_bundle_ids", "com.a, com.b,com.c")
            .unwrap();
        assert_eq!(
            settings.catalog.exclude_bundle_ids,
            vec!["com.a".to_string(), "com.b".to_string(), "com.c".to_string()]
        );
    }

    #[test]
    fn test_set_value_platform_filter() {
        let mut settings = Settings::default();
        settings.set_value("catalog.platform_filter", "macos").unwrap();
        assert_eq!(settings.catalog.platform_filter, PlatformFilter::Macos);
    }

    #[test]
    fn test_set_value_invalid_platform_filter() {
        let mut settings = Settings::default();
        assert!(settings
            .set_value("catalog.platform_filter", "windows")
            .is_err());
    }

    #[test]
    fn test_set_value_ttl() {
        let mut settings = Settings::default();
        settings.set_value("catalog.cache_ttl_secs", "3600").unwrap();
        assert_eq!(settings.catalog.cache_ttl_secs, 3600);
    }

    #[test]
    fn test_set_value_invalid_ttl() {
        let mut settings = Settings::default();
        assert!(settings.set_value("catalog.cache_ttl_secs", "soon").is_err());
    }

    #[test]
    fn test_set_value_unknown_key() {
        let mut settings = Settings::default();
        assert!(settings.set_value("api.token", "abc").is_err());
    }

    #[test]
    fn test_set_value_invalid_output_format() {
        let mut settings = Settings::default();
        assert!(settings.set_value("output.format", "xml").is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_to_shelf_config() {
        let mut settings = Settings::default();
        settings.catalog.developer_id = Some("123".to_string());
        settings.catalog.country = Some("de".to_string());
        settings.catalog.exclude_bundle_ids = vec!["com.x".to_string()];
        settings.catalog.cache_ttl_secs = 60;
        settings.catalog.own_bundle_id = Some("com.me".to_string());
        settings.display.max_count = Some(5);

        let config = settings.to_shelf_config().unwrap();
        assert_eq!(config.developer_id, "123");
        assert_eq!(config.country, Some("de".to_string()));
        assert!(config.exclude_bundle_ids.contains("com.x"));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.own_bundle_id, Some("com.me".to_string()));
        assert_eq!(config.display.max_count, Some(5));
    }

    #[test]
    fn test_to_shelf_config_requires_developer_id() {
        let settings = Settings::default();
        assert!(matches!(
            settings.to_shelf_config().unwrap_err(),
            ShelfError::NotConfigured
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Serialization Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_settings_serialize_to_toml() {
        let mut settings = Settings::default();
        settings.catalog.developer_id = Some("123".to_string());

        let toml_str = toml::to_string_pretty(&settings).unwrap();
        assert!(toml_str.contains("developer_id = \"123\""));
        assert!(toml_str.contains("[catalog]"));
    }

    #[test]
    fn test_settings_deserialize_from_toml() {
        let toml_str = r#"
[catalog]
developer_id = "555"
platform_filter = "ios"
cache_ttl_secs = 7200

[display]
show_rating = false

[output]
format = "json"
"#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.catalog.developer_id, Some("555".to_string()));
        assert_eq!(settings.catalog.platform_filter, PlatformFilter::Ios);
        assert_eq!(settings.catalog.cache_ttl_secs, 7200);
        assert!(!settings.display.show_rating);
        assert!(settings.display.show_price);
        assert_eq!(settings.output.format, "json");
    }
}
