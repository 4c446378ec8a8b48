use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

/// Fetch, cache, and browse a developer's published App Store catalog
#[derive(Parser)]
#[command(name = "appshelf")]
#[command(version, propagate_version = true)]
#[command(about = "Fetch, cache, and browse a developer's published App Store catalog")]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Developer id (overrides the configured default)
    #[arg(short, long, global = true, env = "APPSHELF_DEVELOPER_ID")]
    pub developer_id: Option<String>,

    /// Two-letter store country code (overrides locale resolution)
    #[arg(short, long, global = true)]
    pub country: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Print shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the developer's published apps
    #[command(alias = "a")]
    Apps(AppsArgs),

    /// Show this product's own catalog record
    Current,

    /// Load the catalog with stale fallback and bounded retries
    #[command(alias = "l")]
    Load(LoadArgs),

    /// Manage the local catalog cache
    Cache(CacheArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the apps command
#[derive(Args)]
pub struct AppsArgs {
    /// Bypass the fresh cache and refetch from the lookup service
    #[arg(long)]
    pub no_cache: bool,

    /// Show the raw catalog, skipping partitioning and exclusions
    #[arg(long)]
    pub all: bool,

    /// Filter apps by name
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the load command
#[derive(Args)]
pub struct LoadArgs {
    /// Ignore the fresh cache and go straight to the fetch path
    #[arg(long)]
    pub refresh: bool,
}

/// Arguments for the cache command
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

/// Cache subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cache status
    Status,
    /// Clear all cached data
    Clear,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., catalog.developer_id)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
