use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::reports::dtos::UpvoteResponse;
use crate::modules::api::CivicApi;

/// Per-report upvote state kept in sync with the server's responses.
pub struct UpvoteController {
    api: Arc<dyn CivicApi>,
    report_id: String,
    upvoted: AtomicBool,
    count: AtomicU32,
    in_flight: AtomicBool,
}

impl UpvoteController {
    pub fn new(api: Arc<dyn CivicApi>, report_id: impl Into<String>, initial_count: u32) -> Self {
        Self {
            api,
            report_id: report_id.into(),
            upvoted: AtomicBool::new(false),
            count: AtomicU32::new(initial_count),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn upvoted(&self) -> bool {
        self.upvoted.load(Ordering::SeqCst)
    }

    pub fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }

    /// Ask the server whether the current user already upvoted this report.
    pub async fn check(&self) -> Result<bool> {
        let upvoted = self.api.check_upvote(&self.report_id).await?;
        self.upvoted.store(upvoted, Ordering::SeqCst);
        Ok(upvoted)
    }

    /// Toggle the upvote. Returns `None` when a toggle is already in
    /// flight (repeat clicks are ignored until the server answers).
    pub async fn toggle(&self) -> Result<Option<UpvoteResponse>> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }

        let result = self.api.upvote_report(&self.report_id).await;
        self.in_flight.store(false, Ordering::SeqCst);

        let response = result?;
        self.upvoted.store(response.upvoted, Ordering::SeqCst);
        self.count.store(response.upvote_count, Ordering::SeqCst);
        Ok(Some(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportStatus;
    use crate::shared::test_helpers::{report_with_status, MockApi};

    #[tokio::test]
    async fn toggle_flips_state_by_exactly_one_per_call() {
        let api = Arc::new(MockApi::new());
        api.seed(vec![report_with_status("r1", ReportStatus::Pending)]);

        let controller = UpvoteController::new(api.clone(), "r1", 0);
        assert!(!controller.check().await.unwrap());

        let up = controller.toggle().await.unwrap().unwrap();
        assert!(up.upvoted);
        assert_eq!(up.upvote_count, 1);
        assert!(controller.check().await.unwrap());

        let down = controller.toggle().await.unwrap().unwrap();
        assert!(!down.upvoted);
        assert_eq!(down.upvote_count, 0);
        assert!(!controller.check().await.unwrap());
        assert_eq!(controller.count(), 0);
    }
}
