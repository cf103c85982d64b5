//! Typed HTTP client for the attendance backend.
//!
//! One `ApiClient` holds the base URL, request timeout, and optional bearer
//! credential. Every operation is a thin typed wrapper: build the request,
//! send, map non-2xx responses to [`ApiError`], decode the body.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::errors::{ApiError, error_from_response};
use crate::api::types::{
    AttendanceHistory, CreateSessionRequest, CreateSessionResponse, DashboardStats,
    EndSessionResponse, LoginRequest, LoginResponse, MarkConfirmation, MarkRequest, Profile,
    SessionStats, SessionSummary, SessionsResponse, StudentProfileResponse,
    TeacherProfileResponse, TokenIssue,
};

/// Join a base URL and an endpoint path without doubling slashes.
fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl ApiClient {
    /// Build a client for the given backend.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            bearer: None,
        })
    }

    /// Attach a bearer credential to all subsequent requests.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.get(endpoint_url(&self.base_url, path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.post(endpoint_url(&self.base_url, path)))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode one JSON response.
    ///
    /// Reads the body as text first so error payloads can be extracted from
    /// non-2xx responses before any decode attempt.
    async fn execute<T: DeserializeOwned>(
        &self,
        op: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let request_id = uuid::Uuid::new_v4();

        debug!(event = "core.api.request_started", op = op, request_id = %request_id);

        let response = builder.send().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            let err = error_from_response(status.as_u16(), &body);
            warn!(
                event = "core.api.request_failed",
                op = op,
                request_id = %request_id,
                status = status.as_u16(),
                error = %err
            );
            return Err(err);
        }

        debug!(
            event = "core.api.request_completed",
            op = op,
            request_id = %request_id,
            status = status.as_u16()
        );

        serde_json::from_str(&body).map_err(|e| ApiError::Protocol {
            message: format!("{}: {}", op, e),
        })
    }

    // --- auth ---

    pub async fn login_student(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.execute("login_student", self.post("student/login").json(req))
            .await
    }

    pub async fn login_teacher(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.execute("login_teacher", self.post("teacher/login").json(req))
            .await
    }

    pub async fn student_profile(&self) -> Result<Profile, ApiError> {
        let response: StudentProfileResponse = self
            .execute("student_profile", self.get("student/profile"))
            .await?;
        Ok(response.student)
    }

    pub async fn teacher_profile(&self) -> Result<Profile, ApiError> {
        let response: TeacherProfileResponse = self
            .execute("teacher_profile", self.get("teacher/profile"))
            .await?;
        Ok(response.teacher)
    }

    // --- sessions ---

    pub async fn create_session(
        &self,
        req: &CreateSessionRequest,
    ) -> Result<CreateSessionResponse, ApiError> {
        self.execute(
            "create_session",
            self.post("attendance/create-session").json(req),
        )
        .await
    }

    pub async fn teacher_sessions(&self) -> Result<Vec<SessionSummary>, ApiError> {
        let response: SessionsResponse = self
            .execute("teacher_sessions", self.get("teacher/sessions"))
            .await?;
        Ok(response.sessions)
    }

    pub async fn session_stats(&self, session_db_id: i64) -> Result<SessionStats, ApiError> {
        self.execute(
            "session_stats",
            self.get(&format!("attendance/session/{}/stats", session_db_id)),
        )
        .await
    }

    pub async fn end_session(&self, session_db_id: i64) -> Result<EndSessionResponse, ApiError> {
        self.execute(
            "end_session",
            self.post(&format!("attendance/session/{}/end", session_db_id)),
        )
        .await
    }

    // --- rotating token ---

    pub async fn generate_token(&self, session_db_id: i64) -> Result<TokenIssue, ApiError> {
        self.execute(
            "generate_token",
            self.get(&format!("attendance/generate-qr/{}", session_db_id)),
        )
        .await
    }

    // --- attendance ---

    pub async fn mark_attendance(&self, req: &MarkRequest) -> Result<MarkConfirmation, ApiError> {
        self.execute("mark_attendance", self.post("attendance/mark").json(req))
            .await
    }

    pub async fn attendance_history(&self) -> Result<AttendanceHistory, ApiError> {
        self.execute("attendance_history", self.get("student/attendance"))
            .await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.execute("dashboard_stats", self.get("student/dashboard/stats"))
            .await
    }
}
