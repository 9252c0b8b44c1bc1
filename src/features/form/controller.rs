use std::sync::{Arc, Mutex};

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::form::attachments::{
    screen_files, ImageAttachment, PreviewId, PreviewRegistry, SelectionNotice,
};
use crate::features::reports::dtos::ReportPayload;
use crate::features::reports::geocoding::ReverseGeocoder;
use crate::features::reports::models::{Report, ReportCategory, Urgency};
use crate::modules::api::CivicApi;
use crate::shared::constants::MAX_PHOTOS;

/// Create takes its location from the current tracker sample at the moment
/// the form opens; edit is pinned to the original report's coordinates.
#[derive(Debug, Clone)]
pub enum FormMode {
    Create { latitude: f64, longitude: f64 },
    Edit(Report),
}

#[derive(Debug)]
struct SelectedImage {
    attachment: ImageAttachment,
    preview: PreviewId,
}

/// Create/edit form lifecycle: field state, image selection, upload
/// orchestration and submit.
///
/// On success `submit` returns the canonical server-returned report for the
/// caller to push into its `ReportFeed`; create mode then resets all local
/// state, edit mode leaves it for the closing view to discard. On any
/// failure the inline error is recorded and every entered field survives
/// for retry.
pub struct ReportFormController {
    api: Arc<dyn CivicApi>,
    geocoder: Option<Arc<dyn ReverseGeocoder>>,
    mode: FormMode,
    title: String,
    description: String,
    category: Option<ReportCategory>,
    urgency: Urgency,
    address: Option<String>,
    selected: Vec<SelectedImage>,
    previews: Arc<Mutex<PreviewRegistry>>,
    error: Option<String>,
}

impl ReportFormController {
    pub fn create(api: Arc<dyn CivicApi>, latitude: f64, longitude: f64) -> Self {
        Self::new(api, FormMode::Create { latitude, longitude })
    }

    /// Edit form prefilled from the report being edited.
    pub fn edit(api: Arc<dyn CivicApi>, report: Report) -> Self {
        let mut controller = Self::new(api, FormMode::Edit(report.clone()));
        controller.title = report.title;
        controller.description = report.description;
        controller.category = Some(report.category);
        controller.urgency = report.urgency;
        controller.address = report.address;
        controller
    }

    fn new(api: Arc<dyn CivicApi>, mode: FormMode) -> Self {
        Self {
            api,
            geocoder: None,
            mode,
            title: String::new(),
            description: String::new(),
            category: None,
            urgency: Urgency::default(),
            address: None,
            selected: Vec::new(),
            previews: Arc::new(Mutex::new(PreviewRegistry::default())),
            error: None,
        }
    }

    /// Attach a reverse geocoder so the location card can show an address
    /// for the pinned coordinates.
    pub fn with_geocoder(mut self, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn category(&self) -> Option<ReportCategory> {
        self.category
    }

    pub fn set_category(&mut self, category: ReportCategory) {
        self.category = Some(category);
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn set_urgency(&mut self, urgency: Urgency) {
        self.urgency = urgency;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Coordinates the submitted report will carry. Fixed to the original
    /// pair in edit mode.
    pub fn coordinates(&self) -> (f64, f64) {
        match &self.mode {
            FormMode::Create { latitude, longitude } => (*latitude, *longitude),
            FormMode::Edit(report) => (report.latitude, report.longitude),
        }
    }

    /// Address line for the location card, once resolved.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Look up the address for the pinned coordinates. Best effort: with no
    /// geocoder attached the card simply shows no address.
    pub async fn resolve_address(&mut self) -> Option<&str> {
        if let Some(geocoder) = self.geocoder.clone() {
            let (latitude, longitude) = self.coordinates();
            self.address = Some(geocoder.address_for(latitude, longitude).await);
        }
        self.address.as_deref()
    }

    /// Photo URLs already on the report (edit mode only). These cannot be
    /// removed, only added to.
    pub fn existing_photos(&self) -> &[String] {
        match &self.mode {
            FormMode::Create { .. } => &[],
            FormMode::Edit(report) => &report.photos,
        }
    }

    pub fn photo_slots_left(&self) -> usize {
        MAX_PHOTOS.saturating_sub(self.existing_photos().len() + self.selected.len())
    }

    /// Preview registry handle, shared so callers can verify cleanup.
    pub fn previews(&self) -> Arc<Mutex<PreviewRegistry>> {
        Arc::clone(&self.previews)
    }

    pub fn preview_urls(&self) -> Vec<String> {
        self.selected.iter().map(|s| s.preview.url()).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Accept a batch of picked or dropped files, returning one notice per
    /// rejected file. Valid files are accepted regardless of rejected
    /// siblings; the total is capped at the remaining photo slots.
    pub fn select_images(&mut self, files: Vec<ImageAttachment>) -> Vec<SelectionNotice> {
        let (accepted, notices) = screen_files(files, self.photo_slots_left());

        let mut registry = self.previews.lock().expect("preview lock poisoned");
        for attachment in accepted {
            let preview = registry.create();
            self.selected.push(SelectedImage { attachment, preview });
        }

        notices
    }

    /// Remove a newly selected image, releasing its preview URL.
    pub fn remove_image(&mut self, index: usize) -> bool {
        if index >= self.selected.len() {
            return false;
        }
        let removed = self.selected.remove(index);
        self.previews
            .lock()
            .expect("preview lock poisoned")
            .release(removed.preview);
        true
    }

    /// Client-side validation, checked before anything is sent.
    fn validate(&self) -> Result<ReportPayload> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(AppError::Validation("Description is required".to_string()));
        }

        let Some(category) = self.category else {
            return Err(AppError::Validation("Please select a category".to_string()));
        };

        let (latitude, longitude) = self.coordinates();
        let payload = ReportPayload {
            title: title.to_string(),
            description: description.to_string(),
            category,
            urgency: self.urgency,
            latitude,
            longitude,
            photos: Vec::new(),
        };

        payload
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(payload)
    }

    /// Validate, upload any newly selected images, then create or update
    /// the report. Returns the canonical server-returned report.
    pub async fn submit(&mut self) -> Result<Report> {
        self.error = None;

        let mut payload = match self.validate() {
            Ok(payload) => payload,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        // Edit mode keeps the report's existing photos; new uploads append.
        let mut photo_urls = self.existing_photos().to_vec();

        if !self.selected.is_empty() {
            let files: Vec<ImageAttachment> =
                self.selected.iter().map(|s| s.attachment.clone()).collect();
            match self.api.upload_images(files).await {
                Ok(urls) => photo_urls.extend(urls),
                Err(e) => {
                    tracing::error!("Image upload failed: {}", e);
                    self.error = Some("Failed to upload images".to_string());
                    return Err(e);
                }
            }
        }

        payload.photos = photo_urls;

        let result = match &self.mode {
            FormMode::Create { .. } => self.api.create_report(&payload).await,
            FormMode::Edit(report) => self.api.update_report(&report.id, &payload).await,
        };

        match result {
            Ok(report) => {
                tracing::info!("Report submitted: {}", report.id);
                if !self.is_editing() {
                    self.reset();
                }
                Ok(report)
            }
            Err(e) => {
                self.error = Some(format!("Failed to submit report: {}", e));
                Err(e)
            }
        }
    }

    /// Clear all entered state and release every preview URL.
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.category = None;
        self.urgency = Urgency::default();
        self.error = None;
        self.release_previews();
    }

    fn release_previews(&mut self) {
        let mut registry = self.previews.lock().expect("preview lock poisoned");
        for selected in self.selected.drain(..) {
            registry.release(selected.preview);
        }
    }
}

impl Drop for ReportFormController {
    fn drop(&mut self) {
        // Teardown is an exit path too; previews must not leak.
        self.release_previews();
    }
}
