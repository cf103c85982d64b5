//! Attendance submission and student read views.

use std::time::Duration;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::api::types::{AttendanceHistory, DashboardStats, MarkConfirmation, MarkRequest};
use crate::attendance::errors::AttendanceError;
use crate::attendance::source::SubmissionSource;
use crate::device::DeviceContext;

/// Submit one attendance mark for a scanned token.
///
/// The token is validated before any network activity. Device signals are
/// attached when present and omitted when not; absence never blocks the
/// submission.
pub async fn mark_attendance<S: SubmissionSource>(
    source: &S,
    token_value: &str,
    device: &DeviceContext,
) -> Result<MarkConfirmation, AttendanceError> {
    let token_value = token_value.trim();
    if token_value.is_empty() {
        return Err(AttendanceError::EmptyToken);
    }

    info!(
        event = "core.attendance.mark_started",
        has_geo = device.geo.is_some(),
        has_wifi = device.network.is_some()
    );

    let request = MarkRequest {
        qr_data: token_value.to_string(),
        latitude: device.geo.map(|g| g.latitude),
        longitude: device.geo.map(|g| g.longitude),
        wifi_ssid: device.network.as_ref().map(|n| n.ssid.clone()),
        wifi_bssid: device.network.as_ref().and_then(|n| n.bssid.clone()),
    };

    let confirmation = match source.submit_mark(&request).await {
        Ok(confirmation) => confirmation,
        Err(e) => {
            warn!(event = "core.attendance.mark_failed", error = %e);
            return Err(AttendanceError::from(e));
        }
    };

    info!(
        event = "core.attendance.mark_completed",
        subject = %confirmation.session.subject
    );

    Ok(confirmation)
}

/// Submit a mark, then re-read the dashboard stats after a settle delay so
/// the returned view includes the new record. The delay exists because the
/// backend's aggregate counters lag the accepted submission.
///
/// The re-read is best-effort: a successful mark is reported even when the
/// follow-up view fetch fails.
pub async fn mark_and_refresh<S: SubmissionSource>(
    source: &S,
    token_value: &str,
    device: &DeviceContext,
    view_refresh_delay: Duration,
) -> Result<(MarkConfirmation, Option<DashboardStats>), AttendanceError> {
    let confirmation = mark_attendance(source, token_value, device).await?;

    tokio::time::sleep(view_refresh_delay).await;

    let stats = match source.fetch_dashboard().await {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!(event = "core.attendance.view_refresh_failed", error = %e);
            None
        }
    };

    Ok((confirmation, stats))
}

pub async fn attendance_history(client: &ApiClient) -> Result<AttendanceHistory, AttendanceError> {
    info!(event = "core.attendance.history_started");

    let history = client.attendance_history().await?;

    info!(
        event = "core.attendance.history_completed",
        records = history.attendance.len()
    );

    Ok(history)
}

pub async fn dashboard_stats(client: &ApiClient) -> Result<DashboardStats, AttendanceError> {
    info!(event = "core.attendance.dashboard_started");

    let stats = client.dashboard_stats().await?;

    info!(
        event = "core.attendance.dashboard_completed",
        subjects = stats.subject_wise_attendance.len()
    );

    Ok(stats)
}
