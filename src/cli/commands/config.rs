//! Configuration management commands

use colored::Colorize;

use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::config::{Paths, Settings};
use crate::error::Result;
use crate::output::json;

/// Handle config commands
pub fn config(settings: &mut Settings, args: &ConfigArgs, format: OutputFormat) -> Result<String> {
    match &args.command {
        ConfigCommands::Show => show(settings, format),
        ConfigCommands::Set { key, value } => set(settings, key, value, format),
        ConfigCommands::Path => {
            let paths = Paths::new()?;
            Ok(paths.config_file.display().to_string())
        }
    }
}

fn show(settings: &Settings, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(toml::to_string_pretty(settings)?.trim_end().to_string()),
        OutputFormat::Json => json::format_json(settings),
    }
}

fn set(settings: &mut Settings, key: &str, value: &str, format: OutputFormat) -> Result<String> {
    settings.set_value(key, value)?;
    settings.save()?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} {key} = {value}", "✓".green())),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": "set",
                "key": key,
                "value": value,
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}
