use crate::errors::RollcallError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Invalid semester: {value}. Must be 1 or greater")]
    InvalidSemester { value: i64 },

    #[error("Invalid total students: {value}. Must be greater than zero")]
    InvalidTotalStudents { value: i64 },

    #[error("API request failed: {source}")]
    ApiError {
        #[from]
        source: crate::api::errors::ApiError,
    },
}

impl RollcallError for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::EmptyField { .. } => "SESSION_EMPTY_FIELD",
            SessionError::InvalidSemester { .. } => "SESSION_INVALID_SEMESTER",
            SessionError::InvalidTotalStudents { .. } => "SESSION_INVALID_TOTAL_STUDENTS",
            SessionError::ApiError { .. } => "SESSION_API_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            SessionError::EmptyField { .. }
            | SessionError::InvalidSemester { .. }
            | SessionError::InvalidTotalStudents { .. } => true,
            SessionError::ApiError { source } => source.is_user_error(),
        }
    }
}
