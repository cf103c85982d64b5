//! Teacher-side session operations.
//!
//! All of these are one-shot calls; the continuous watch loop lives in
//! [`crate::watch`].

use tracing::info;

use crate::api::types::{
    CreateSessionRequest, CreateSessionResponse, EndSessionResponse, SessionStats, SessionSummary,
};
use crate::api::ApiClient;
use crate::sessions::errors::SessionError;

/// Input for a new attendance session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub subject: String,
    pub branch: String,
    pub semester: i64,
    pub division: String,
    pub total_students: i64,
}

fn validate_new_session(new: &NewSession) -> Result<(), SessionError> {
    if new.subject.trim().is_empty() {
        return Err(SessionError::EmptyField { field: "subject" });
    }
    if new.branch.trim().is_empty() {
        return Err(SessionError::EmptyField { field: "branch" });
    }
    if new.division.trim().is_empty() {
        return Err(SessionError::EmptyField { field: "division" });
    }
    if new.semester < 1 {
        return Err(SessionError::InvalidSemester {
            value: new.semester,
        });
    }
    if new.total_students < 1 {
        return Err(SessionError::InvalidTotalStudents {
            value: new.total_students,
        });
    }

    Ok(())
}

pub async fn create_session(
    client: &ApiClient,
    new: NewSession,
) -> Result<CreateSessionResponse, SessionError> {
    validate_new_session(&new)?;

    info!(
        event = "core.session.create_started",
        subject = %new.subject,
        branch = %new.branch,
        semester = new.semester
    );

    let request = CreateSessionRequest {
        subject: new.subject,
        branch: new.branch,
        semester: new.semester,
        division: new.division,
        total_students: new.total_students,
    };

    let response = client.create_session(&request).await?;

    info!(
        event = "core.session.create_completed",
        session_db_id = response.session.id,
        session_id = %response.session.session_id
    );

    Ok(response)
}

pub async fn list_sessions(client: &ApiClient) -> Result<Vec<SessionSummary>, SessionError> {
    info!(event = "core.session.list_started");

    let sessions = client.teacher_sessions().await?;

    info!(event = "core.session.list_completed", count = sessions.len());

    Ok(sessions)
}

pub async fn session_stats(
    client: &ApiClient,
    session_db_id: i64,
) -> Result<SessionStats, SessionError> {
    info!(
        event = "core.session.stats_started",
        session_db_id = session_db_id
    );

    let stats = client.session_stats(session_db_id).await?;

    info!(
        event = "core.session.stats_completed",
        session_db_id = session_db_id,
        present = stats.present_count,
        is_active = stats.is_active
    );

    Ok(stats)
}

pub async fn end_session(
    client: &ApiClient,
    session_db_id: i64,
) -> Result<EndSessionResponse, SessionError> {
    info!(
        event = "core.session.end_started",
        session_db_id = session_db_id
    );

    let response = client.end_session(session_db_id).await?;

    info!(
        event = "core.session.end_completed",
        session_db_id = session_db_id
    );

    Ok(response)
}
