use thiserror::Error;

/// Result type alias for appshelf operations
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Errors that can occur during appshelf operations
#[derive(Error, Debug)]
pub enum ShelfError {
    /// No active configuration when a data operation was requested
    #[error("Not configured. Run 'appshelf config set catalog.developer_id <id>' first.")]
    NotConfigured,

    /// Lookup API error with HTTP status
    #[error("Lookup API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error (malformed lookup envelope)
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// No app data available after all fallbacks
    #[error("No app data available.")]
    NoData,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

impl ShelfError {
    /// Create an API error from HTTP status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether the error came from the network layer (transport or HTTP status)
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Http(_))
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotConfigured | Self::Config(_) => 2,
            Self::Api { .. } | Self::Http(_) => 3,
            Self::NoData => 4,
            _ => 1,
        }
    }
}
