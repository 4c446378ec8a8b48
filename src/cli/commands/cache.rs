//! Cache management commands

use colored::Colorize;

use crate::cache;
use crate::cli::args::{CacheArgs, CacheCommands, OutputFormat};
use crate::config::Paths;
use crate::error::Result;

/// Handle cache commands
pub fn cache(args: &CacheArgs, ttl_secs: u64, format: OutputFormat) -> Result<String> {
    let paths = Paths::new()?;

    match &args.command {
        CacheCommands::Status => status(&paths, ttl_secs, format),
        CacheCommands::Clear => clear(&paths, format),
    }
}

fn status(paths: &Paths, ttl_secs: u64, format: OutputFormat) -> Result<String> {
    let status = cache::status(&paths.cache_dir);

    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", "Cache Status".bold()));
            output.push_str(&format!("Location: {}\n\n", paths.cache_dir.display()));

            output.push_str(&"Catalog Cache:\n".dimmed().to_string());
            if status.catalog.exists {
                if let Some(count) = status.catalog.count {
                    output.push_str(&format!("  Apps: {}\n", count));
                }
                if let Some(age) = status.catalog.age_secs {
                    let age_str = format_age(age);
                    if age < ttl_secs {
                        output.push_str(&format!("  Age: {} {}\n", age_str, "(fresh)".green()));
                    } else {
                        output.push_str(&format!("  Age: {} {}\n", age_str, "(stale)".yellow()));
                    }
                }
            } else {
                output.push_str(&format!("  {}\n", "Not cached".dimmed()));
            }

            Ok(output.trim_end().to_string())
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "cache_dir": paths.cache_dir.to_string_lossy(),
                "catalog": {
                    "exists": status.catalog.exists,
                    "age_secs": status.catalog.age_secs,
                    "count": status.catalog.count,
                }
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}

fn clear(paths: &Paths, format: OutputFormat) -> Result<String> {
    cache::clear_all(&paths.cache_dir)?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Cache cleared", "✓".green())),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": "cleared"
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}

/// Format age in human-readable form
fn format_age(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age_seconds() {
        assert_eq!(format_age(45), "45s");
    }

    #[test]
    fn test_format_age_minutes() {
        assert_eq!(format_age(125), "2m 5s");
    }

    #[test]
    fn test_format_age_hours() {
        assert_eq!(format_age(7260), "2h 1m");
    }
}
