use crate::errors::RollcallError;

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Initial token fetch failed: {source}")]
    StartFailed {
        #[from]
        source: crate::api::errors::ApiError,
    },

    #[error("Invalid watch interval: {field} must be greater than zero")]
    InvalidInterval { field: &'static str },
}

impl RollcallError for WatchError {
    fn error_code(&self) -> &'static str {
        match self {
            WatchError::StartFailed { .. } => "WATCH_START_FAILED",
            WatchError::InvalidInterval { .. } => "WATCH_INVALID_INTERVAL",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            WatchError::StartFailed { source } => source.is_user_error(),
            WatchError::InvalidInterval { .. } => true,
        }
    }
}
