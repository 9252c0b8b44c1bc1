use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::core::session::SessionStore;
use crate::features::admin::dtos::AdminStats;
use crate::features::auth::dtos::{LoginRequest, LoginResponse};
use crate::features::form::attachments::ImageAttachment;
use crate::features::reports::dtos::{
    ReportListResponse, ReportPayload, ReportResponse, StatusUpdate, UploadResponse,
    UpvoteCheckResponse, UpvoteResponse,
};
use crate::features::reports::filters::FilterCriteria;
use crate::features::reports::models::Report;

/// One method per backend endpoint. Services depend on this trait so tests
/// can substitute an in-memory backend.
#[async_trait]
pub trait CivicApi: Send + Sync {
    async fn google_login(&self, id_token: &str) -> Result<LoginResponse>;

    async fn list_reports(&self, filters: &FilterCriteria) -> Result<Vec<Report>>;
    async fn create_report(&self, payload: &ReportPayload) -> Result<Report>;
    async fn update_report(&self, id: &str, payload: &ReportPayload) -> Result<Report>;
    async fn upload_images(&self, images: Vec<ImageAttachment>) -> Result<Vec<String>>;
    async fn upvote_report(&self, id: &str) -> Result<UpvoteResponse>;
    async fn check_upvote(&self, id: &str) -> Result<bool>;

    async fn admin_list_reports(&self, filters: &FilterCriteria) -> Result<Vec<Report>>;
    async fn admin_update_status(&self, id: &str, update: &StatusUpdate) -> Result<Report>;
    async fn admin_stats(&self) -> Result<AdminStats>;
}

/// Error envelope the backend returns on failed requests.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// reqwest-backed transport. Attaches the bearer token from the session
/// store when present and maps non-success responses onto `AppError`.
pub struct HttpCivicApi {
    http_client: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl HttpCivicApi {
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent("CivicConnectClient/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("Token rejected by backend: {}", message);
            self.session.mark_expired();
            return Err(AppError::Auth(message));
        }

        tracing::error!("API error: HTTP {} - {}", status, message);
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let request = self.authorize(self.http_client.get(self.url(path)).query(query));
        self.handle(request.send().await?).await
    }
}

#[async_trait]
impl CivicApi for HttpCivicApi {
    async fn google_login(&self, id_token: &str) -> Result<LoginResponse> {
        let request = self.http_client.post(self.url("/auth/google")).json(&LoginRequest {
            token: id_token.to_string(),
        });
        self.handle(request.send().await?).await
    }

    async fn list_reports(&self, filters: &FilterCriteria) -> Result<Vec<Report>> {
        let response: ReportListResponse = self.get_json("/reports", &filters.to_query()).await?;
        Ok(response.reports)
    }

    async fn create_report(&self, payload: &ReportPayload) -> Result<Report> {
        let request = self.authorize(self.http_client.post(self.url("/reports")).json(payload));
        let response: ReportResponse = self.handle(request.send().await?).await?;
        Ok(response.report)
    }

    async fn update_report(&self, id: &str, payload: &ReportPayload) -> Result<Report> {
        let request = self.authorize(
            self.http_client
                .put(self.url(&format!("/reports/{}", id)))
                .json(payload),
        );
        let response: ReportResponse = self.handle(request.send().await?).await?;
        Ok(response.report)
    }

    async fn upload_images(&self, images: Vec<ImageAttachment>) -> Result<Vec<String>> {
        let mut form = reqwest::multipart::Form::new();
        for image in images {
            let part = reqwest::multipart::Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part("images", part);
        }

        let request = self.authorize(self.http_client.post(self.url("/reports/upload")))
            .multipart(form);
        let response: UploadResponse = self.handle(request.send().await?).await?;
        Ok(response.urls)
    }

    async fn upvote_report(&self, id: &str) -> Result<UpvoteResponse> {
        let request =
            self.authorize(self.http_client.post(self.url(&format!("/reports/{}/upvote", id))));
        self.handle(request.send().await?).await
    }

    async fn check_upvote(&self, id: &str) -> Result<bool> {
        let request = self.authorize(
            self.http_client
                .get(self.url(&format!("/reports/{}/upvote/check", id))),
        );
        let response: UpvoteCheckResponse = self.handle(request.send().await?).await?;
        Ok(response.upvoted)
    }

    async fn admin_list_reports(&self, filters: &FilterCriteria) -> Result<Vec<Report>> {
        let response: ReportListResponse =
            self.get_json("/admin/reports", &filters.to_query()).await?;
        Ok(response.reports)
    }

    async fn admin_update_status(&self, id: &str, update: &StatusUpdate) -> Result<Report> {
        let request = self.authorize(
            self.http_client
                .patch(self.url(&format!("/admin/reports/{}/status", id)))
                .json(update),
        );
        let response: ReportResponse = self.handle(request.send().await?).await?;
        Ok(response.report)
    }

    async fn admin_stats(&self) -> Result<AdminStats> {
        self.get_json("/admin/stats", &[]).await
    }
}
