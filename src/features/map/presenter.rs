use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::session::SessionUser;
use crate::features::location::tracker::LocationTracker;
use crate::features::reports::feed::ReportFeed;
use crate::features::reports::models::{Report, ReportCategory, ReportStatus, Urgency};
use crate::shared::constants::{ACCURACY_CIRCLE_CAP_METERS, ADDRESS_NOT_FOUND, SELF_MARKER_LABEL};

/// Marker glyph, keyed by workflow status. A closed set: adding a status
/// variant forces the match below to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Red,
    Yellow,
    Green,
    Black,
    /// Self marker and anything without a status of its own.
    MultiColor,
}

impl MarkerIcon {
    pub fn for_status(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Pending => MarkerIcon::Red,
            ReportStatus::InProgress => MarkerIcon::Yellow,
            ReportStatus::Resolved => MarkerIcon::Green,
            ReportStatus::Rejected => MarkerIcon::Black,
        }
    }
}

/// The user's own position marker.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: &'static str,
    pub icon: MarkerIcon,
    /// Draggable while the user is choosing a location manually.
    pub draggable: bool,
    /// Accuracy circle radius in meters, capped so a poor fix does not
    /// swallow the whole viewport. Absent when accuracy is unknown.
    pub accuracy_radius: Option<f64>,
}

/// One marker per report in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMarker {
    pub report_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub icon: MarkerIcon,
    pub title: String,
}

/// Detail popup shown when a report marker is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPopup {
    pub report_id: String,
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    pub status: ReportStatus,
    pub urgency: Urgency,
    pub address: Option<String>,
    pub photos: Vec<String>,
    pub upvote_count: u32,
    pub reporter_name: String,
    pub created_at: DateTime<Utc>,
    /// Edit is offered only to the report's own author.
    pub can_edit: bool,
}

impl ReportPopup {
    /// Address line for display; reports without one show the placeholder.
    pub fn address_display(&self) -> &str {
        self.address.as_deref().unwrap_or(ADDRESS_NOT_FOUND)
    }
}

/// Presentation model for the map view: turns tracker state and the report
/// store into marker and popup descriptors for a UI layer to render.
pub struct MapPresenter {
    tracker: Arc<LocationTracker>,
    feed: Arc<ReportFeed>,
}

impl MapPresenter {
    pub fn new(tracker: Arc<LocationTracker>, feed: Arc<ReportFeed>) -> Self {
        Self { tracker, feed }
    }

    pub fn self_marker(&self) -> SelfMarker {
        let state = self.tracker.current();
        SelfMarker {
            latitude: state.sample.latitude,
            longitude: state.sample.longitude,
            label: SELF_MARKER_LABEL,
            icon: MarkerIcon::MultiColor,
            draggable: state.manual_mode,
            accuracy_radius: state
                .sample
                .accuracy
                .map(|a| a.min(ACCURACY_CIRCLE_CAP_METERS)),
        }
    }

    pub fn report_markers(&self) -> Vec<ReportMarker> {
        self.feed
            .reports()
            .into_iter()
            .map(|report| ReportMarker {
                icon: MarkerIcon::for_status(report.status),
                report_id: report.id,
                latitude: report.latitude,
                longitude: report.longitude,
                title: report.title,
            })
            .collect()
    }

    pub fn popup(&self, report: &Report, user: Option<&SessionUser>) -> ReportPopup {
        ReportPopup {
            report_id: report.id.clone(),
            title: report.title.clone(),
            description: report.description.clone(),
            category: report.category,
            status: report.status,
            urgency: report.urgency,
            address: report.address.clone(),
            photos: report.photos.clone(),
            upvote_count: report.upvote_count,
            reporter_name: report.reported_by.name.clone(),
            created_at: report.created_at,
            can_edit: user.is_some_and(|u| u.id == report.reported_by.id),
        }
    }

    /// Map click: a manual location pick when manual mode is active,
    /// otherwise ignored. Returns whether it was applied.
    pub fn handle_map_click(&self, latitude: f64, longitude: f64) -> bool {
        self.tracker.apply_map_click(latitude, longitude)
    }

    pub fn handle_marker_drag(&self, latitude: f64, longitude: f64) -> bool {
        self.tracker.apply_marker_drag(latitude, longitude)
    }
}
