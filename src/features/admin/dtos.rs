use serde::Deserialize;

use crate::features::reports::models::Report;

/// One aggregation bucket as the backend's pipeline emits it. The key is
/// the grouped value (a status, category or urgency string); a null key
/// groups documents missing the field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BucketCount {
    #[serde(rename = "_id")]
    pub key: Option<String>,
    pub count: u64,
}

/// Aggregate counters for the stats dashboard.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_reports: u64,
    #[serde(default)]
    pub status_stats: Vec<BucketCount>,
    #[serde(default)]
    pub category_stats: Vec<BucketCount>,
    #[serde(default)]
    pub urgency_stats: Vec<BucketCount>,
    #[serde(default)]
    pub recent_activity: Vec<Report>,
}

impl AdminStats {
    /// Share of the total for one bucket, as a whole percentage. Zero when
    /// there are no reports at all.
    pub fn percent_of_total(&self, bucket: &BucketCount) -> u64 {
        if self.total_reports == 0 {
            return 0;
        }
        bucket.count * 100 / self.total_reports
    }

    pub fn status_count(&self, status: &str) -> u64 {
        self.status_stats
            .iter()
            .find(|b| b.key.as_deref() == Some(status))
            .map(|b| b.count)
            .unwrap_or(0)
    }
}
