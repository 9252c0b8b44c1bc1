use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::reports::models::{Report, ReportCategory, ReportStatus, Urgency};

/// Body for report create and update calls. Coordinates are set once at
/// creation; the edit flow re-sends the original pair unchanged.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[validate(length(min = 1, max = 50, message = "Title must be between 1 and 50 characters"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 500,
        message = "Description must be between 1 and 500 characters"
    ))]
    pub description: String,

    pub category: ReportCategory,
    pub urgency: Urgency,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportListResponse {
    pub reports: Vec<Report>,
}

#[derive(Debug, Deserialize)]
pub struct ReportResponse {
    pub report: Report,
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteResponse {
    pub upvoted: bool,
    pub upvote_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpvoteCheckResponse {
    pub upvoted: bool,
}

/// Admin status-change request: appends to the report's status history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}
