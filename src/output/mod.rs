pub mod json;
pub mod pretty;

use crate::catalog::{AppRecord, DisplayOptions};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::partition::Partitioned;

/// Format a list of apps based on output format
pub fn format_apps(
    apps: &[AppRecord],
    options: &DisplayOptions,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_apps(apps, options)),
        OutputFormat::Json => json::format_apps(apps),
    }
}

/// Format a single app based on output format
pub fn format_app(app: &AppRecord, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_app(app)),
        OutputFormat::Json => json::format_app(app),
    }
}

/// Format a partitioned catalog based on output format
pub fn format_partitioned(
    partitioned: &Partitioned,
    options: &DisplayOptions,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_partitioned(partitioned, options)),
        OutputFormat::Json => json::format_partitioned(partitioned),
    }
}
