use crate::errors::RollcallError;

/// Error talking to the attendance backend.
///
/// The variant is derived from the HTTP status (or transport failure), never
/// from message text. Message text is carried verbatim for display and logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not authenticated: {message}")]
    Unauthorized { message: String },

    #[error("Access denied: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Backend error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Invalid response from backend: {message}")]
    Protocol { message: String },
}

impl ApiError {
    /// Whether this error means the stored credential no longer grants
    /// access (missing, expired, or wrong role).
    pub fn is_auth_loss(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. }
        )
    }

    /// Human-readable message without the status prefix.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::Forbidden { message }
            | ApiError::NotFound { message }
            | ApiError::Rejected { message, .. }
            | ApiError::Server { message, .. }
            | ApiError::Network { message }
            | ApiError::Protocol { message } => message,
        }
    }
}

impl RollcallError for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized { .. } => "API_UNAUTHORIZED",
            ApiError::Forbidden { .. } => "API_FORBIDDEN",
            ApiError::NotFound { .. } => "API_NOT_FOUND",
            ApiError::Rejected { .. } => "API_REJECTED",
            ApiError::Server { .. } => "API_SERVER_ERROR",
            ApiError::Network { .. } => "API_NETWORK_ERROR",
            ApiError::Protocol { .. } => "API_PROTOCOL_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. }
                | ApiError::Forbidden { .. }
                | ApiError::NotFound { .. }
                | ApiError::Rejected { .. }
        )
    }
}

/// Map a non-2xx response to a typed error.
///
/// The backend sends `{"error": "...", "details": "..."}` payloads; both
/// parts are preserved in the message. Bodies that are not JSON fall back
/// to a generic message so transport-level failures never hide the status.
pub fn error_from_response(status: u16, body: &str) -> ApiError {
    let message = extract_error_message(status, body);

    match status {
        401 => ApiError::Unauthorized { message },
        403 => ApiError::Forbidden { message },
        404 => ApiError::NotFound { message },
        400..=499 => ApiError::Rejected { status, message },
        _ => ApiError::Server { status, message },
    }
}

fn extract_error_message(status: u16, body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return format!("Request failed with status {}", status);
    };

    let error = value.get("error").and_then(|e| e.as_str());
    let details = value.get("details").and_then(|d| d.as_str());

    match (error, details) {
        (Some(e), Some(d)) => format!("{}: {}", e, d),
        (Some(e), None) => e.to_string(),
        _ => format!("Request failed with status {}", status),
    }
}
