//! Wire types for the attendance backend.
//!
//! Field names mirror the backend's JSON exactly. Responses carry more
//! fields than listed here; serde ignores what the client does not use.

use serde::{Deserialize, Serialize};

/// Credentials sent to `/student/login` or `/teacher/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload. Exactly one of `student`/`teacher` is present
/// depending on which endpoint was called.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub student: Option<Profile>,
    #[serde(default)]
    pub teacher: Option<Profile>,
}

impl LoginResponse {
    /// Display name of whoever logged in, if the backend included a profile.
    pub fn display_name(&self) -> Option<&str> {
        self.student
            .as_ref()
            .or(self.teacher.as_ref())
            .map(|p| p.full_name.as_str())
    }
}

/// Common slice of the student/teacher profile payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub branch: Option<String>,
    /// Students only.
    #[serde(default)]
    pub semester: Option<i64>,
    /// Teachers only.
    #[serde(default)]
    pub designation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentProfileResponse {
    pub student: Profile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeacherProfileResponse {
    pub teacher: Profile,
}

/// Request body for `/attendance/create-session`. All fields are required
/// by the backend.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest {
    pub subject: String,
    pub branch: String,
    pub semester: i64,
    pub division: String,
    pub total_students: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionResponse {
    pub message: String,
    pub session: SessionSummary,
}

/// A session as the backend reports it (`Session.to_dict`).
///
/// `id` is the numeric key used in endpoint paths; `session_id` is the
/// human-facing code (e.g. `SES20260826a1b2c3d4`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: i64,
    pub session_id: String,
    pub subject: String,
    pub branch: String,
    pub semester: i64,
    #[serde(default)]
    pub session_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub is_active: bool,
    pub total_students: i64,
    pub present_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionSummary>,
}

/// A freshly issued rotating token from `/attendance/generate-qr/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenIssue {
    /// Base64-encoded PNG rendering of the token.
    pub qr_code: String,
    /// The opaque token value itself. Never interpreted client-side.
    pub qr_data: String,
    pub expires_at: String,
    pub session_id: String,
    pub subject: String,
    #[serde(default)]
    pub security_features: SecurityFeatures,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityFeatures {
    #[serde(default)]
    pub expires_in_seconds: Option<u64>,
}

impl TokenIssue {
    /// Server-declared token lifetime, defaulting to 6 seconds.
    pub fn expires_in_seconds(&self) -> u64 {
        self.security_features.expires_in_seconds.unwrap_or(6)
    }
}

/// Request body for `/attendance/mark`. Optional signals are omitted when
/// unavailable; the backend treats absence as valid input.
#[derive(Debug, Clone, Serialize)]
pub struct MarkRequest {
    pub qr_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_ssid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_bssid: Option<String>,
}

/// Successful submission confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkConfirmation {
    pub message: String,
    pub session: MarkedSession,
    #[serde(default)]
    pub wifi_location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkedSession {
    pub subject: String,
    pub date: String,
}

/// Live progress snapshot from `/attendance/session/{id}/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub present_count: i64,
    pub total_students: i64,
    #[serde(default)]
    pub attendance_percentage: Option<f64>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndSessionResponse {
    pub message: String,
    pub session: SessionSummary,
}

/// `/student/attendance` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceHistory {
    pub attendance: Vec<AttendanceRecord>,
    pub statistics: AttendanceStatistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub subject: String,
    pub session_date: String,
    #[serde(default)]
    pub marked_at: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceStatistics {
    pub total_sessions: i64,
    pub present: i64,
    pub absent: i64,
    pub percentage: f64,
}

/// `/student/dashboard/stats` response (the dependent read view refreshed
/// after a successful submission).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub attendance: DashboardTotals,
    #[serde(default)]
    pub subject_wise_attendance: Vec<SubjectAttendance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub total_sessions: i64,
    pub present: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectAttendance {
    pub subject: String,
    pub total_sessions: i64,
    pub present: i64,
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_issue_deserializes_backend_payload() {
        let body = r#"{
            "qr_code": "iVBORw0KGgo=",
            "qr_data": "eyJ0b2tlbiI6ICJhYmMifQ",
            "expires_at": "2026-08-26T10:00:06",
            "session_id": "SES20260826a1b2c3d4",
            "subject": "Physics",
            "security_features": {
                "encrypted": true,
                "time_limited": true,
                "expires_in_seconds": 6
            }
        }"#;
        let issue: TokenIssue = serde_json::from_str(body).unwrap();
        assert_eq!(issue.qr_data, "eyJ0b2tlbiI6ICJhYmMifQ");
        assert_eq!(issue.subject, "Physics");
        assert_eq!(issue.expires_in_seconds(), 6);
    }

    #[test]
    fn test_token_issue_missing_security_features() {
        let body = r#"{
            "qr_code": "iVBORw0KGgo=",
            "qr_data": "tok",
            "expires_at": "2026-08-26T10:00:06",
            "session_id": "SES1",
            "subject": "Maths"
        }"#;
        let issue: TokenIssue = serde_json::from_str(body).unwrap();
        assert_eq!(issue.expires_in_seconds(), 6);
    }

    #[test]
    fn test_mark_request_omits_absent_signals() {
        let req = MarkRequest {
            qr_data: "tok".to_string(),
            latitude: None,
            longitude: None,
            wifi_ssid: None,
            wifi_bssid: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"qr_data":"tok"}"#);
    }

    #[test]
    fn test_mark_request_includes_present_signals() {
        let req = MarkRequest {
            qr_data: "tok".to_string(),
            latitude: Some(12.9716),
            longitude: Some(77.5946),
            wifi_ssid: Some("CampusNet".to_string()),
            wifi_bssid: None,
        };
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["latitude"], 12.9716);
        assert_eq!(json["wifi_ssid"], "CampusNet");
        assert!(json.get("wifi_bssid").is_none());
    }

    #[test]
    fn test_mark_confirmation_deserializes() {
        let body = r#"{
            "message": "Attendance marked successfully",
            "attendance": {"id": 7, "status": "Present"},
            "session": {"subject": "Physics", "date": "2026-08-26"},
            "security_verified": {"qr_code": true, "wifi": false, "student_registration": true},
            "wifi_location": null
        }"#;
        let conf: MarkConfirmation = serde_json::from_str(body).unwrap();
        assert_eq!(conf.message, "Attendance marked successfully");
        assert_eq!(conf.session.subject, "Physics");
        assert!(conf.wifi_location.is_none());
    }

    #[test]
    fn test_session_stats_deserializes() {
        let body = r#"{
            "session": {"id": 3, "session_id": "SES1", "subject": "Physics",
                        "branch": "CSE", "semester": 5, "is_active": true,
                        "total_students": 30, "present_count": 10},
            "present_count": 10,
            "total_students": 30,
            "attendance_percentage": 33.33,
            "is_active": true
        }"#;
        let stats: SessionStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.present_count, 10);
        assert_eq!(stats.total_students, 30);
        assert!(stats.is_active);
    }

    #[test]
    fn test_login_response_display_name() {
        let body = r#"{
            "message": "Login successful",
            "token": "jwt-value",
            "student": {"id": 1, "email": "s@example.edu", "full_name": "Asha Rao",
                        "branch": "CSE", "semester": 5}
        }"#;
        let resp: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.token, "jwt-value");
        assert_eq!(resp.display_name(), Some("Asha Rao"));
    }

    #[test]
    fn test_attendance_history_deserializes() {
        let body = r#"{
            "attendance": [
                {"id": 1, "subject": "Physics", "session_date": "2026-08-25",
                 "marked_at": "2026-08-25T09:03:11", "status": "Present"}
            ],
            "statistics": {"total_sessions": 1, "present": 1, "absent": 0, "percentage": 100.0}
        }"#;
        let history: AttendanceHistory = serde_json::from_str(body).unwrap();
        assert_eq!(history.attendance.len(), 1);
        assert_eq!(history.statistics.percentage, 100.0);
    }
}
