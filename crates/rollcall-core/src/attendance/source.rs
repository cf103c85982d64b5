//! Data source seam for the submission path.

use std::future::Future;

use crate::api::ApiClient;
use crate::api::errors::ApiError;
use crate::api::types::{DashboardStats, MarkConfirmation, MarkRequest};

/// Where a mark is submitted and where its dependent view is read from.
///
/// [`ApiClient`] is the production source; tests substitute scripted fakes.
pub trait SubmissionSource {
    fn submit_mark(
        &self,
        request: &MarkRequest,
    ) -> impl Future<Output = Result<MarkConfirmation, ApiError>>;

    fn fetch_dashboard(&self) -> impl Future<Output = Result<DashboardStats, ApiError>>;
}

impl SubmissionSource for ApiClient {
    async fn submit_mark(&self, request: &MarkRequest) -> Result<MarkConfirmation, ApiError> {
        self.mark_attendance(request).await
    }

    async fn fetch_dashboard(&self) -> Result<DashboardStats, ApiError> {
        self.dashboard_stats().await
    }
}
