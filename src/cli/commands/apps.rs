use crate::catalog::ShelfConfig;
use crate::cli::args::{AppsArgs, OutputFormat};
use crate::error::Result;
use crate::output;
use crate::partition::partition;
use crate::service::CatalogService;

/// Handle the apps command
pub async fn apps(
    service: &CatalogService,
    config: &ShelfConfig,
    args: &AppsArgs,
    format: OutputFormat,
) -> Result<String> {
    let records = if args.no_cache {
        service.refresh_apps().await?
    } else {
        service.fetch_apps().await?
    };

    // Raw view: the full catalog exactly as fetched
    if args.all {
        return output::format_apps(&records, &config.display, format);
    }

    let mut partitioned = partition(&records, config);

    if let Some(filter) = &args.filter {
        let filter_lower = filter.to_lowercase();
        partitioned
            .others
            .retain(|app| app.name.to_lowercase().contains(&filter_lower));
    }

    output::format_partitioned(&partitioned, &config.display, format)
}
