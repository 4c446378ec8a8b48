//! Splitting a record list into the current app and the "other apps" list

use crate::catalog::{AppRecord, ShelfConfig};

/// Result of partitioning a catalog under a config
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partitioned {
    /// The running product's own record, when `show_current_app` is set and
    /// the catalog contains it
    pub current: Option<AppRecord>,
    /// Remaining records in input order
    pub others: Vec<AppRecord>,
}

impl Partitioned {
    /// All records including the current app, current first
    pub fn all(&self) -> Vec<AppRecord> {
        let mut all = Vec::with_capacity(self.others.len() + 1);
        if let Some(current) = &self.current {
            all.push(current.clone());
        }
        all.extend(self.others.iter().cloned());
        all
    }
}

/// Partition records into (current, others).
///
/// Pure and deterministic: platform filter first, then current-app
/// extraction, then exclusions. A record matching the own bundle identifier
/// never appears in `others`, whether or not `show_current_app` is set.
/// Input relative order is preserved; nothing is sorted.
pub fn partition(records: &[AppRecord], config: &ShelfConfig) -> Partitioned {
    let own_bundle_id = config.own_bundle_id.as_deref();

    let filtered: Vec<&AppRecord> = records
        .iter()
        .filter(|r| config.platform_filter.matches(r.platform))
        .collect();

    let current = if config.show_current_app {
        filtered
            .iter()
            .find(|r| Some(r.bundle_id.as_str()) == own_bundle_id)
            .map(|r| (*r).clone())
    } else {
        None
    };

    let others = filtered
        .into_iter()
        .filter(|r| Some(r.bundle_id.as_str()) != own_bundle_id)
        .filter(|r| !config.exclude_bundle_ids.contains(&r.bundle_id))
        .cloned()
        .collect();

    Partitioned { current, others }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Platform, PlatformFilter};

    fn make_record(id: i64, bundle: &str, platform: Platform) -> AppRecord {
        AppRecord {
            id,
            name: format!("App {id}"),
            description: String::new(),
            icon_url: "https://example.com/icon.png".to_string(),
            store_url: format!("https://apps.apple.com/app/id{id}"),
            bundle_id: bundle.to_string(),
            price: "Free".to_string(),
            genres: vec![],
            average_rating: None,
            rating_count: None,
            platform,
        }
    }

    fn bundles(records: &[AppRecord]) -> Vec<&str> {
        records.iter().map(|r| r.bundle_id.as_str()).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Platform Filter Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_partition_keeps_all_platforms_by_default() {
        let records = vec![
            make_record(1, "com.a", Platform::Ios),
            make_record(2, "com.b", Platform::Macos),
            make_record(3, "com.c", Platform::Unknown),
        ];
        let config = ShelfConfig::new("dev");

        let partitioned = partition(&records, &config);
        assert_eq!(partitioned.others.len(), 3);
    }

    #[test]
    fn test_partition_filters_to_ios() {
        let records = vec![
            make_record(1, "com.a", Platform::Ios),
            make_record(2, "com.b", Platform::Macos),
            make_record(3, "com.c", Platform::Ios),
        ];
        let mut config = ShelfConfig::new("dev");
        config.platform_filter = PlatformFilter::Ios;

        let partitioned = partition(&records, &config);
        assert_eq!(bundles(&partitioned.others), vec!["com.a", "com.c"]);
    }

    #[test]
    fn test_partition_filters_to_macos() {
        let records = vec![
            make_record(1, "com.a", Platform::Ios),
            make_record(2, "com.b", Platform::Macos),
        ];
        let mut config = ShelfConfig::new("dev");
        config.platform_filter = PlatformFilter::Macos;

        let partitioned = partition(&records, &config);
        assert_eq!(bundles(&partitioned.others), vec!["com.b"]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Current App Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_partition_extracts_current_app() {
        let records = vec![
            make_record(1, "com.other", Platform::Ios),
            make_record(2, "com.mine", Platform::Ios),
        ];
        let mut config = ShelfConfig::new("dev");
        config.show_current_app = true;
        config.own_bundle_id = Some("com.mine".to_string());

        let partitioned = partition(&records, &config);
        assert_eq!(partitioned.current.unwrap().bundle_id, "com.mine");
        assert_eq!(bundles(&partitioned.others), vec!["com.other"]);
    }

    #[test]
    fn test_partition_no_current_when_flag_off() {
        let records = vec![make_record(1, "com.mine", Platform::Ios)];
        let mut config = ShelfConfig::new("dev");
        config.own_bundle_id = Some("com.mine".to_string());

        let partitioned = partition(&records, &config);
        assert!(partitioned.current.is_none());
        // Still never listed among the others
        assert!(partitioned.others.is_empty());
    }

    #[test]
    fn test_partition_no_current_without_own_bundle_id() {
        let records = vec![make_record(1, "com.a", Platform::Ios)];
        let mut config = ShelfConfig::new("dev");
        config.show_current_app = true;

        let partitioned = partition(&records, &config);
        assert!(partitioned.current.is_none());
        assert_eq!(partitioned.others.len(), 1);
    }

    #[test]
    fn test_partition_current_takes_first_match() {
        let records = vec![
            make_record(1, "com.mine", Platform::Ios),
            make_record(2, "com.mine", Platform::Ios),
        ];
        let mut config = ShelfConfig::new("dev");
        config.show_current_app = true;
        config.own_bundle_id = Some("com.mine".to_string());

        let partitioned = partition(&records, &config);
        assert_eq!(partitioned.current.unwrap().id, 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Exclusion Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_partition_drops_excluded_bundles() {
        let records = vec![
            make_record(1, "com.keep", Platform::Ios),
            make_record(2, "com.drop", Platform::Ios),
        ];
        let mut config = ShelfConfig::new("dev");
        config.exclude_bundle_ids.insert("com.drop".to_string());

        let partitioned = partition(&records, &config);
        assert_eq!(bundles(&partitioned.others), vec!["com.keep"]);
    }

    #[test]
    fn test_partition_current_and_exclusion_together() {
        // excludeBundleIds={"x"}, showCurrentApp=true, own bundle "y":
        // current is "y", others exclude both "y" and "x"
        let records = vec![
            make_record(1, "y", Platform::Ios),
            make_record(2, "x", Platform::Ios),
            make_record(3, "z", Platform::Ios),
        ];
        let mut config = ShelfConfig::new("dev");
        config.show_current_app = true;
        config.own_bundle_id = Some("y".to_string());
        config.exclude_bundle_ids.insert("x".to_string());

        let partitioned = partition(&records, &config);
        assert_eq!(partitioned.current.as_ref().unwrap().bundle_id, "y");
        assert_eq!(bundles(&partitioned.others), vec!["z"]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ordering Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_partition_preserves_input_order() {
        let records = vec![
            make_record(3, "com.c", Platform::Ios),
            make_record(1, "com.a", Platform::Ios),
            make_record(2, "com.b", Platform::Ios),
        ];
        let config = ShelfConfig::new("dev");

        let partitioned = partition(&records, &config);
        assert_eq!(bundles(&partitioned.others), vec!["com.c", "com.a", "com.b"]);
    }

    #[test]
    fn test_all_puts_current_first() {
        let records = vec![
            make_record(1, "com.other", Platform::Ios),
            make_record(2, "com.mine", Platform::Ios),
        ];
        let mut config = ShelfConfig::new("dev");
        config.show_current_app = true;
        config.own_bundle_id = Some("com.mine".to_string());

        let partitioned = partition(&records, &config);
        let all = partitioned.all();
        assert_eq!(all[0].bundle_id, "com.mine");
        assert_eq!(all[1].bundle_id, "com.other");
    }
}
