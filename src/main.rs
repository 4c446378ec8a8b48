use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use appshelf::cli::args::{Cli, Commands, CompletionsArgs};
use appshelf::cli::commands;
use appshelf::config::{Paths, Settings};
use appshelf::error::ShelfError;
use appshelf::service::CatalogService;

#[tokio::main]
async fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

async fn run() -> Result<(), ShelfError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = cli.output;

    // Handle completions command early (no config needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    // Load configuration and apply command-line overrides
    let mut settings = Settings::load()?;
    if let Some(developer_id) = &cli.developer_id {
        settings.catalog.developer_id = Some(developer_id.clone());
    }
    if let Some(country) = &cli.country {
        settings.catalog.country = Some(country.to_lowercase());
    }

    let output = match &cli.command {
        Commands::Completions(_) => unreachable!(), // Handled above
        Commands::Config(args) => commands::config(&mut settings, args, format)?,
        Commands::Cache(args) => commands::cache(args, settings.catalog.cache_ttl_secs, format)?,

        // Data commands need the configured service
        _ => {
            let config = settings.to_shelf_config()?;
            let paths = Paths::new()?;
            let mut service = CatalogService::new(&paths.cache_dir)?;
            service.configure(config.clone());

            match &cli.command {
                Commands::Apps(args) => commands::apps(&service, &config, args, format).await?,
                Commands::Current => commands::current(&service, format).await?,
                Commands::Load(args) => commands::load(&service, &config, args, format).await?,
                Commands::Cache(_) | Commands::Config(_) | Commands::Completions(_) => {
                    unreachable!()
                }
            }
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

/// Install the stderr log subscriber; RUST_LOG overrides the verbosity flag
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "appshelf=debug" } else { "appshelf=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
