use crate::errors::RollcallError;

#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("Token value cannot be empty")]
    EmptyToken,

    #[error("API request failed: {source}")]
    ApiError {
        #[from]
        source: crate::api::errors::ApiError,
    },
}

impl AttendanceError {
    /// The failure message as the backend phrased it, for hint matching.
    pub fn message(&self) -> &str {
        match self {
            AttendanceError::EmptyToken => "Token value cannot be empty",
            AttendanceError::ApiError { source } => source.message(),
        }
    }
}

impl RollcallError for AttendanceError {
    fn error_code(&self) -> &'static str {
        match self {
            AttendanceError::EmptyToken => "ATTENDANCE_EMPTY_TOKEN",
            AttendanceError::ApiError { .. } => "ATTENDANCE_API_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            AttendanceError::EmptyToken => true,
            AttendanceError::ApiError { source } => source.is_user_error(),
        }
    }
}
