use chrono::NaiveDate;

use crate::features::reports::models::{ReportCategory, ReportStatus};

/// Active query for the report list. All fields optional; absence means
/// "no constraint". The backend performs the actual filtering, so the
/// criteria are passed verbatim as query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn with_status(status: ReportStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query-parameter pairs for the list endpoints; unset fields are omitted.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.to_string()));
        }
        if let Some(date_from) = self.date_from {
            params.push(("dateFrom", date_from.to_string()));
        }
        if let Some(date_to) = self.date_to {
            params.push(("dateTo", date_to.to_string()));
        }
        params
    }
}
