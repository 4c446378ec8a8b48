use serde::Serialize;

use crate::catalog::AppRecord;
use crate::error::Result;
use crate::partition::Partitioned;

/// Format apps as JSON
pub fn format_apps(apps: &[AppRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(apps)?)
}

/// Format a single app as JSON
pub fn format_app(app: &AppRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(app)?)
}

/// Format a partitioned catalog as JSON
pub fn format_partitioned(partitioned: &Partitioned) -> Result<String> {
    #[derive(Serialize)]
    struct PartitionedDoc<'a> {
        current: &'a Option<AppRecord>,
        others: &'a [AppRecord],
    }

    Ok(serde_json::to_string_pretty(&PartitionedDoc {
        current: &partitioned.current,
        others: &partitioned.others,
    })?)
}

/// Format any serializable value as JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
