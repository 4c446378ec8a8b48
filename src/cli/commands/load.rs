use std::sync::atomic::Ordering;

use crate::catalog::ShelfConfig;
use crate::cli::args::{LoadArgs, OutputFormat};
use crate::error::{Result, ShelfError};
use crate::loader::LoadState;
use crate::output;
use crate::service::CatalogService;

/// Handle the load command.
///
/// Drives a full load cycle: fresh cache, then fetch with stale fallback and
/// bounded retries. Ctrl+C cancels cooperatively at the next suspension
/// point.
pub async fn load(
    service: &CatalogService,
    config: &ShelfConfig,
    args: &LoadArgs,
    format: OutputFormat,
) -> Result<String> {
    let mut loader = service.make_loader()?;

    let cancel = loader.cancel_flag();
    // A second handler registration (e.g. in tests) fails silently; the flag
    // still works for this invocation
    let _ = ctrlc::set_handler(move || cancel.store(true, Ordering::SeqCst));

    if args.refresh {
        loader.retry().await;
    } else {
        loader.load().await;
    }

    match loader.state() {
        LoadState::Loaded(partitioned) => {
            output::format_partitioned(partitioned, &config.display, format)
        }
        LoadState::Failed => Err(ShelfError::NoData),
        _ => Ok("Load cancelled.".to_string()),
    }
}
