//! In-memory backend fake and report fixtures shared across test modules.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::core::error::{AppError, Result};
use crate::core::session::{SessionUser, UserRole};
use crate::features::admin::dtos::{AdminStats, BucketCount};
use crate::features::auth::dtos::LoginResponse;
use crate::features::form::attachments::ImageAttachment;
use crate::features::reports::dtos::{ReportPayload, StatusUpdate, UpvoteResponse};
use crate::features::reports::filters::FilterCriteria;
use crate::features::reports::models::{
    Report, ReportCategory, ReportStatus, ReportedBy, StatusHistoryEntry, Urgency,
};
use crate::modules::api::CivicApi;

pub fn mock_user() -> SessionUser {
    SessionUser {
        id: "u1".to_string(),
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        role: UserRole::Citizen,
    }
}

pub fn sample_report(id: &str) -> Report {
    Report {
        id: id.to_string(),
        title: "Pothole on Elm St".to_string(),
        description: "Large pothole near intersection".to_string(),
        category: ReportCategory::Pothole,
        urgency: Urgency::Medium,
        status: ReportStatus::Pending,
        latitude: 13.05,
        longitude: 80.21,
        address: None,
        photos: Vec::new(),
        upvote_count: 0,
        reported_by: ReportedBy {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
        },
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        status_history: vec![StatusHistoryEntry {
            status: ReportStatus::Pending,
            changed_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            admin_notes: None,
        }],
    }
}

pub fn report_with_status(id: &str, status: ReportStatus) -> Report {
    let mut report = sample_report(id);
    report.status = status;
    report
}

pub fn image_file(name: &str, size: usize) -> ImageAttachment {
    ImageAttachment {
        file_name: name.to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0u8; size],
    }
}

#[derive(Default)]
struct MockState {
    reports: Vec<Report>,
    upvoted: HashSet<String>,
    list_latencies: VecDeque<Duration>,
    next_id: u32,
}

/// In-memory `CivicApi`: seeded reports, per-call latency injection and
/// one-shot failure switches.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
    list_calls: AtomicUsize,
    admin_list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fail_next_list: AtomicBool,
    fail_next_admin_list: AtomicBool,
    fail_next_upload: AtomicBool,
    fail_next_login: AtomicBool,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, reports: Vec<Report>) {
        self.state.lock().unwrap().reports = reports;
    }

    /// Queue a latency for the next list fetch (citizen or admin); fetches
    /// beyond the queue answer immediately.
    pub fn push_list_latency(&self, latency: Duration) {
        self.state.lock().unwrap().list_latencies.push_back(latency);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn admin_list_calls(&self) -> usize {
        self.admin_list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn fail_next_list(&self) {
        self.fail_next_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_admin_list(&self) {
        self.fail_next_admin_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_upload(&self) {
        self.fail_next_upload.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_login(&self) {
        self.fail_next_login.store(true, Ordering::SeqCst);
    }

    async fn apply_latency(&self) {
        let latency = self.state.lock().unwrap().list_latencies.pop_front();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn filtered(&self, filters: &FilterCriteria) -> Vec<Report> {
        self.state
            .lock()
            .unwrap()
            .reports
            .iter()
            .filter(|r| matches(r, filters))
            .cloned()
            .collect()
    }
}

fn matches(report: &Report, filters: &FilterCriteria) -> bool {
    if let Some(status) = filters.status {
        if report.status != status {
            return false;
        }
    }
    if let Some(category) = filters.category {
        if report.category != category {
            return false;
        }
    }
    let date = report.created_at.date_naive();
    if let Some(from) = filters.date_from {
        if date < from {
            return false;
        }
    }
    if let Some(to) = filters.date_to {
        if date > to {
            return false;
        }
    }
    true
}

fn buckets(reports: &[Report], key: impl Fn(&Report) -> &'static str) -> Vec<BucketCount> {
    let mut counts: BTreeMap<&'static str, u64> = BTreeMap::new();
    for report in reports {
        *counts.entry(key(report)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| BucketCount {
            key: Some(key.to_string()),
            count,
        })
        .collect()
}

fn server_error(message: &str) -> AppError {
    AppError::Api {
        status: 500,
        message: message.to_string(),
    }
}

#[async_trait]
impl CivicApi for MockApi {
    async fn google_login(&self, _id_token: &str) -> Result<LoginResponse> {
        if self.fail_next_login.swap(false, Ordering::SeqCst) {
            return Err(AppError::Api {
                status: 401,
                message: "Invalid Google token".to_string(),
            });
        }
        Ok(LoginResponse {
            token: "mock-session-token".to_string(),
            user: mock_user(),
        })
    }

    async fn list_reports(&self, filters: &FilterCriteria) -> Result<Vec<Report>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_latency().await;
        if self.fail_next_list.swap(false, Ordering::SeqCst) {
            return Err(server_error("List failed"));
        }
        Ok(self.filtered(filters))
    }

    async fn create_report(&self, payload: &ReportPayload) -> Result<Report> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now();

        let report = Report {
            id: format!("report-{}", state.next_id),
            title: payload.title.clone(),
            description: payload.description.clone(),
            category: payload.category,
            urgency: payload.urgency,
            status: ReportStatus::Pending,
            latitude: payload.latitude,
            longitude: payload.longitude,
            address: None,
            photos: payload.photos.clone(),
            upvote_count: 0,
            reported_by: ReportedBy {
                id: "u1".to_string(),
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
            },
            created_at: now,
            status_history: vec![StatusHistoryEntry {
                status: ReportStatus::Pending,
                changed_at: now,
                admin_notes: None,
            }],
        };
        state.reports.insert(0, report.clone());
        Ok(report)
    }

    async fn update_report(&self, id: &str, payload: &ReportPayload) -> Result<Report> {
        let mut state = self.state.lock().unwrap();
        let report = state
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::Api {
                status: 404,
                message: "Report not found".to_string(),
            })?;

        // Only the citizen-editable fields change; identity, coordinates,
        // reporter and timestamps stay as created.
        report.title = payload.title.clone();
        report.description = payload.description.clone();
        report.category = payload.category;
        report.urgency = payload.urgency;
        report.photos = payload.photos.clone();
        Ok(report.clone())
    }

    async fn upload_images(&self, images: Vec<ImageAttachment>) -> Result<Vec<String>> {
        if self.fail_next_upload.swap(false, Ordering::SeqCst) {
            return Err(server_error("Upload failed"));
        }
        let mut state = self.state.lock().unwrap();
        let mut urls = Vec::with_capacity(images.len());
        for _ in &images {
            state.next_id += 1;
            urls.push(format!("https://cdn.example/upload-{}.jpg", state.next_id));
        }
        Ok(urls)
    }

    async fn upvote_report(&self, id: &str) -> Result<UpvoteResponse> {
        let mut state = self.state.lock().unwrap();
        let upvoted = if state.upvoted.remove(id) {
            false
        } else {
            state.upvoted.insert(id.to_string());
            true
        };

        let report = state
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::Api {
                status: 404,
                message: "Report not found".to_string(),
            })?;
        if upvoted {
            report.upvote_count += 1;
        } else {
            report.upvote_count = report.upvote_count.saturating_sub(1);
        }

        Ok(UpvoteResponse {
            upvoted,
            upvote_count: report.upvote_count,
        })
    }

    async fn check_upvote(&self, id: &str) -> Result<bool> {
        Ok(self.state.lock().unwrap().upvoted.contains(id))
    }

    async fn admin_list_reports(&self, filters: &FilterCriteria) -> Result<Vec<Report>> {
        self.admin_list_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_latency().await;
        if self.fail_next_admin_list.swap(false, Ordering::SeqCst) {
            return Err(server_error("Admin list failed"));
        }
        Ok(self.filtered(filters))
    }

    async fn admin_update_status(&self, id: &str, update: &StatusUpdate) -> Result<Report> {
        let mut state = self.state.lock().unwrap();
        let report = state
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::Api {
                status: 404,
                message: "Report not found".to_string(),
            })?;

        report.status = update.status;
        report.status_history.push(StatusHistoryEntry {
            status: update.status,
            changed_at: Utc::now(),
            admin_notes: update.admin_notes.clone(),
        });
        Ok(report.clone())
    }

    async fn admin_stats(&self) -> Result<AdminStats> {
        let state = self.state.lock().unwrap();
        let reports = &state.reports;
        Ok(AdminStats {
            total_reports: reports.len() as u64,
            status_stats: buckets(reports, |r| r.status.as_str()),
            category_stats: buckets(reports, |r| r.category.as_str()),
            urgency_stats: buckets(reports, |r| r.urgency.as_str()),
            recent_activity: reports.iter().take(5).cloned().collect(),
        })
    }
}
