use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::core::error::Result;
use crate::features::reports::filters::FilterCriteria;
use crate::features::reports::models::Report;
use crate::features::reports::store::ReportStore;
use crate::modules::api::CivicApi;

/// Which list endpoint this feed is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    Citizen,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied to the store.
    Applied(usize),
    /// A newer fetch was dispatched while this one was in flight; the
    /// response was dropped.
    Stale,
}

/// Filter criteria plus the fetch orchestration around them.
///
/// Every filter change triggers exactly one re-fetch scoped to the new
/// criteria. Each fetch carries a monotonically increasing token, and a
/// response is only applied while its token is still the latest, so a slow
/// earlier response can never overwrite a newer filter's results.
pub struct ReportFeed {
    api: Arc<dyn CivicApi>,
    scope: FeedScope,
    criteria: RwLock<FilterCriteria>,
    store: RwLock<ReportStore>,
    last_error: RwLock<Option<String>>,
    seq: AtomicU64,
}

impl ReportFeed {
    pub fn new(api: Arc<dyn CivicApi>, scope: FeedScope) -> Self {
        Self {
            api,
            scope,
            criteria: RwLock::new(FilterCriteria::default()),
            store: RwLock::new(ReportStore::default()),
            last_error: RwLock::new(None),
            seq: AtomicU64::new(0),
        }
    }

    pub fn citizen(api: Arc<dyn CivicApi>) -> Self {
        Self::new(api, FeedScope::Citizen)
    }

    pub fn admin(api: Arc<dyn CivicApi>) -> Self {
        Self::new(api, FeedScope::Admin)
    }

    pub fn filters(&self) -> FilterCriteria {
        self.criteria.read().expect("criteria lock poisoned").clone()
    }

    /// Set new criteria and fetch the list scoped to them.
    pub async fn set_filters(&self, criteria: FilterCriteria) -> Result<FetchOutcome> {
        *self.criteria.write().expect("criteria lock poisoned") = criteria;
        self.refresh().await
    }

    pub async fn clear_filters(&self) -> Result<FetchOutcome> {
        self.set_filters(FilterCriteria::default()).await
    }

    /// Fetch the list for the current criteria. On failure the previous
    /// list stays intact and a transient error is recorded.
    pub async fn refresh(&self) -> Result<FetchOutcome> {
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let criteria = self.filters();

        let result = match self.scope {
            FeedScope::Citizen => self.api.list_reports(&criteria).await,
            FeedScope::Admin => self.api.admin_list_reports(&criteria).await,
        };

        // Last-dispatched-wins: a newer fetch owns the store and the error
        // surface from here on.
        if token != self.seq.load(Ordering::SeqCst) {
            tracing::debug!("Dropping stale report fetch (token {})", token);
            return Ok(FetchOutcome::Stale);
        }

        match result {
            Ok(reports) => {
                let count = reports.len();
                self.store
                    .write()
                    .expect("store lock poisoned")
                    .replace(reports);
                *self.last_error.write().expect("error lock poisoned") = None;
                Ok(FetchOutcome::Applied(count))
            }
            Err(e) => {
                tracing::warn!("Failed to fetch reports: {}", e);
                *self.last_error.write().expect("error lock poisoned") = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Optimistically apply a canonical server-returned report.
    pub fn apply(&self, report: Report) {
        self.store.write().expect("store lock poisoned").apply(report);
    }

    pub fn reports(&self) -> Vec<Report> {
        self.store.read().expect("store lock poisoned").snapshot()
    }

    pub fn get(&self, id: &str) -> Option<Report> {
        self.store
            .read()
            .expect("store lock poisoned")
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.store.read().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().expect("store lock poisoned").is_empty()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().expect("error lock poisoned").clone()
    }
}
