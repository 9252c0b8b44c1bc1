use crate::features::reports::models::Report;

/// Client-side in-memory collection of reports for the current filter set.
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: Vec<Report>,
}

impl ReportStore {
    /// Replace the whole collection with a freshly fetched list.
    pub fn replace(&mut self, reports: Vec<Report>) {
        self.reports = reports;
    }

    /// Upsert a canonical server-returned report: updates in place when the
    /// id is known, otherwise prepends (newest first). This is the
    /// optimistic path after a successful write.
    pub fn apply(&mut self, report: Report) {
        match self.reports.iter_mut().find(|r| r.id == report.id) {
            Some(existing) => *existing = report,
            None => self.reports.insert(0, report),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn snapshot(&self) -> Vec<Report> {
        self.reports.clone()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
