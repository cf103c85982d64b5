//! HTTP surface of the attendance backend.
//!
//! Submodules:
//! - `client`: typed request/response client with bearer auth
//! - `errors`: status-code classification into [`ApiError`] kinds
//! - `types`: wire structs for every endpoint this tool touches

pub mod client;
pub mod errors;
pub mod types;

pub use client::ApiClient;
pub use errors::{ApiError, error_from_response};
pub use types::{
    AttendanceHistory, AttendanceRecord, AttendanceStatistics, CreateSessionRequest,
    CreateSessionResponse, DashboardStats, DashboardTotals, EndSessionResponse, LoginRequest,
    LoginResponse, MarkConfirmation, MarkRequest, MarkedSession, Profile, SecurityFeatures,
    SessionStats, SessionSummary, SessionsResponse, SubjectAttendance, TokenIssue,
};
