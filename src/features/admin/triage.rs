use std::sync::{Arc, RwLock};

use crate::core::error::Result;
use crate::features::admin::dtos::AdminStats;
use crate::features::admin::table::{SortField, TableSort};
use crate::features::reports::dtos::StatusUpdate;
use crate::features::reports::feed::ReportFeed;
use crate::features::reports::filters::FilterCriteria;
use crate::features::reports::models::{Report, ReportStatus};
use crate::modules::api::CivicApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Map,
    Table,
    Stats,
}

/// Admin dashboard state: the admin-scoped report feed, aggregate stats,
/// table ordering and the status-update action.
pub struct AdminTriageView {
    api: Arc<dyn CivicApi>,
    feed: ReportFeed,
    stats: RwLock<Option<AdminStats>>,
    sort: RwLock<TableSort>,
    view: RwLock<ViewMode>,
}

impl AdminTriageView {
    pub fn new(api: Arc<dyn CivicApi>) -> Self {
        Self {
            feed: ReportFeed::admin(api.clone()),
            api,
            stats: RwLock::new(None),
            sort: RwLock::new(TableSort::default()),
            view: RwLock::new(ViewMode::Map),
        }
    }

    pub fn feed(&self) -> &ReportFeed {
        &self.feed
    }

    pub fn view_mode(&self) -> ViewMode {
        *self.view.read().expect("view lock poisoned")
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        *self.view.write().expect("view lock poisoned") = mode;
    }

    /// Initial load: report list plus aggregate stats.
    pub async fn refresh(&self) -> Result<()> {
        self.feed.refresh().await?;
        self.refresh_stats().await
    }

    pub async fn refresh_stats(&self) -> Result<()> {
        let stats = self.api.admin_stats().await?;
        *self.stats.write().expect("stats lock poisoned") = Some(stats);
        Ok(())
    }

    pub fn stats(&self) -> Option<AdminStats> {
        self.stats.read().expect("stats lock poisoned").clone()
    }

    /// Change a report's workflow status. The canonical returned report is
    /// applied to the store immediately, then the list and stats are
    /// re-fetched so every surface agrees with the server. A re-fetch
    /// failure is a transient read error and does not fail the update.
    pub async fn update_status(
        &self,
        id: &str,
        status: ReportStatus,
        admin_notes: Option<String>,
    ) -> Result<Report> {
        let update = StatusUpdate {
            status,
            admin_notes,
        };
        let report = self.api.admin_update_status(id, &update).await?;
        tracing::info!("Report {} moved to {}", report.id, report.status);
        self.feed.apply(report.clone());

        if let Err(e) = self.feed.refresh().await {
            tracing::warn!("List re-fetch after status update failed: {}", e);
        }
        if let Err(e) = self.refresh_stats().await {
            tracing::warn!("Stats re-fetch after status update failed: {}", e);
        }

        Ok(report)
    }

    pub fn table_sort(&self) -> TableSort {
        *self.sort.read().expect("sort lock poisoned")
    }

    /// Column-header click. Local re-ordering only.
    pub fn select_sort(&self, field: SortField) {
        self.sort.write().expect("sort lock poisoned").select(field);
    }

    /// Snapshot of the feed ordered by the current table sort.
    pub fn table_rows(&self) -> Vec<Report> {
        let mut rows = self.feed.reports();
        self.table_sort().sort(&mut rows);
        rows
    }

    /// Sidebar shortcut: show only pending reports.
    pub async fn view_pending(&self) -> Result<()> {
        self.feed
            .set_filters(FilterCriteria::with_status(ReportStatus::Pending))
            .await?;
        Ok(())
    }

    /// Sidebar shortcut: show only resolved reports.
    pub async fn view_resolved(&self) -> Result<()> {
        self.feed
            .set_filters(FilterCriteria::with_status(ReportStatus::Resolved))
            .await?;
        Ok(())
    }
}
