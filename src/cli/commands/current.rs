use crate::cli::args::OutputFormat;
use crate::error::{Result, ShelfError};
use crate::output;
use crate::service::CatalogService;

/// Handle the current command.
///
/// Errors with `NoData` when the configured bundle identifier does not appear
/// in the developer's catalog (e.g. not yet published).
pub async fn current(service: &CatalogService, format: OutputFormat) -> Result<String> {
    if service
        .config()
        .and_then(|c| c.own_bundle_id.as_ref())
        .is_none()
    {
        return Err(ShelfError::Config(
            "No own bundle id set. Run 'appshelf config set catalog.own_bundle_id <id>' first."
                .to_string(),
        ));
    }

    let app = service.current_app().await.ok_or(ShelfError::NoData)?;
    output::format_app(&app, format)
}
