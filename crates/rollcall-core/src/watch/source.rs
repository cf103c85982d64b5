//! Data source seam for the watch loop.

use std::future::Future;

use crate::api::errors::ApiError;
use crate::api::types::{SessionStats, TokenIssue};
use crate::api::ApiClient;

/// Where a watch gets its tokens and stats.
///
/// [`ApiClient`] is the production source; tests substitute scripted fakes.
/// Futures must be `Send` because the watch loop runs on a spawned task.
pub trait WatchSource: Send + Sync + 'static {
    fn fetch_token(
        &self,
        session_db_id: i64,
    ) -> impl Future<Output = Result<TokenIssue, ApiError>> + Send;

    fn fetch_stats(
        &self,
        session_db_id: i64,
    ) -> impl Future<Output = Result<SessionStats, ApiError>> + Send;
}

impl WatchSource for ApiClient {
    async fn fetch_token(&self, session_db_id: i64) -> Result<TokenIssue, ApiError> {
        self.generate_token(session_db_id).await
    }

    async fn fetch_stats(&self, session_db_id: i64) -> Result<SessionStats, ApiError> {
        self.session_stats(session_db_id).await
    }
}
