use colored::Colorize;

use crate::catalog::{AppRecord, DisplayOptions, Platform};
use crate::partition::Partitioned;

/// Safely truncate a string to n characters, appending "..." if truncated.
/// Works correctly with multi-byte UTF-8 characters.
fn truncate_str(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_chars {
        let truncated: String = chars.iter().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Width available for one-line description previews
fn description_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| (w as usize).saturating_sub(6).max(24))
        .unwrap_or(74)
}

fn platform_label(platform: Platform) -> &'static str {
    match platform {
        Platform::Ios => "iOS",
        Platform::Macos => "macOS",
        Platform::Unknown => "unknown",
    }
}

fn rating_line(app: &AppRecord) -> Option<String> {
    let rating = app.average_rating?;
    let count = app
        .rating_count
        .map(|c| format!(" ({c} ratings)"))
        .unwrap_or_default();
    Some(format!("★ {rating:.1}{count}"))
}

/// Format a list of apps for pretty output
pub fn format_apps(apps: &[AppRecord], options: &DisplayOptions) -> String {
    if apps.is_empty() {
        return "No apps found.".to_string();
    }

    let shown: Vec<&AppRecord> = match options.max_count {
        Some(max) => apps.iter().take(max).collect(),
        None => apps.iter().collect(),
    };

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Apps".bold()));
    output.push_str(&"─".repeat(70));
    output.push('\n');

    for app in &shown {
        output.push_str(&format_entry(app, options));
        output.push('\n');
    }

    if shown.len() < apps.len() {
        output.push_str(&format!(
            "{}\n",
            format!("... and {} more", apps.len() - shown.len()).dimmed()
        ));
    }

    output
}

/// One list entry: name line plus the enabled detail lines
fn format_entry(app: &AppRecord, options: &DisplayOptions) -> String {
    let mut output = String::new();

    let mut name_line = format!("{} [{}]", app.name.bold(), platform_label(app.platform));
    if options.show_price {
        name_line.push_str(&format!(" {}", app.price.green()));
    }
    output.push_str(&name_line);
    output.push('\n');

    output.push_str(&format!("  {} {}\n", "Bundle:".cyan(), app.bundle_id));

    if options.show_rating {
        if let Some(rating) = rating_line(app) {
            output.push_str(&format!("  {} {}\n", "Rating:".cyan(), rating.yellow()));
        }
    }

    if !app.genres.is_empty() {
        output.push_str(&format!("  {} {}\n", "Genres:".cyan(), app.genres.join(", ")));
    }

    if options.show_description && !app.description.is_empty() {
        let preview = truncate_str(
            app.description.lines().next().unwrap_or(""),
            description_width(),
        );
        output.push_str(&format!("  {}\n", preview.dimmed()));
    }

    output.push_str(&format!("  {} {}\n", "Store:".cyan(), app.store_url.dimmed()));

    output
}

/// Format a single app in full detail
pub fn format_app(app: &AppRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} [{}]\n",
        app.name.bold(),
        platform_label(app.platform)
    ));
    output.push_str(&"─".repeat(50));
    output.push('\n');

    output.push_str(&format!("{} {}\n", "Id:".cyan(), app.id));
    output.push_str(&format!("{} {}\n", "Bundle:".cyan(), app.bundle_id));
    output.push_str(&format!("{} {}\n", "Price:".cyan(), app.price));

    if let Some(rating) = rating_line(app) {
        output.push_str(&format!("{} {}\n", "Rating:".cyan(), rating));
    }
    if !app.genres.is_empty() {
        output.push_str(&format!("{} {}\n", "Genres:".cyan(), app.genres.join(", ")));
    }
    if !app.description.is_empty() {
        let preview = truncate_str(&app.description, 400);
        output.push_str(&format!("\n{preview}\n"));
    }

    output.push_str(&format!("\n{} {}\n", "Store:".cyan(), app.store_url));
    output.push_str(&format!("{} {}\n", "Icon:".cyan(), app.icon_url.dimmed()));
    output.push_str(&format!("{} {}\n", "Review:".cyan(), app.review_url().dimmed()));
    output.push_str(&format!("{} {}\n", "Share:".cyan(), app.share_url()));

    output
}

/// Format a partitioned catalog: the current app, then the others
pub fn format_partitioned(partitioned: &Partitioned, options: &DisplayOptions) -> String {
    let mut output = String::new();

    if let Some(current) = &partitioned.current {
        output.push_str(&format!("{}\n", "This App".bold()));
        output.push_str(&"─".repeat(70));
        output.push('\n');
        output.push_str(&format_entry(current, options));
        output.push('\n');
    }

    if partitioned.others.is_empty() {
        output.push_str("No other apps found.");
        return output;
    }

    output.push_str(&format!("{}\n", "More Apps".bold()));
    output.push_str(&"─".repeat(70));
    output.push('\n');

    let shown: Vec<&AppRecord> = match options.max_count {
        Some(max) => partitioned.others.iter().take(max).collect(),
        None => partitioned.others.iter().collect(),
    };
    for app in &shown {
        output.push_str(&format_entry(app, options));
        output.push('\n');
    }
    if shown.len() < partitioned.others.len() {
        output.push_str(&format!(
            "{}\n",
            format!("... and {} more", partitioned.others.len() - shown.len()).dimmed()
        ));
    }

    output.trim_end().to_string()
}
