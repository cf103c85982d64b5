use crate::errors::RollcallError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Not logged in. Run 'rollcall login' first.")]
    NotLoggedIn,

    #[error("Invalid role: '{value}'. Valid: student, teacher")]
    InvalidRole { value: String },

    #[error("This command requires a {required} login, but you are logged in as {actual}")]
    WrongRole { required: String, actual: String },

    #[error("Credential file is corrupt: {message}")]
    CredentialParseError { message: String },

    #[error("API request failed: {source}")]
    ApiError {
        #[from]
        source: crate::api::errors::ApiError,
    },

    #[error("IO operation failed: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl RollcallError for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            AuthError::NotLoggedIn => "AUTH_NOT_LOGGED_IN",
            AuthError::InvalidRole { .. } => "AUTH_INVALID_ROLE",
            AuthError::WrongRole { .. } => "AUTH_WRONG_ROLE",
            AuthError::CredentialParseError { .. } => "AUTH_CREDENTIAL_PARSE_ERROR",
            AuthError::ApiError { .. } => "AUTH_API_ERROR",
            AuthError::IoError { .. } => "AUTH_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            AuthError::NotLoggedIn | AuthError::InvalidRole { .. } | AuthError::WrongRole { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_logged_in_display() {
        let error = AuthError::NotLoggedIn;
        assert_eq!(error.to_string(), "Not logged in. Run 'rollcall login' first.");
        assert_eq!(error.error_code(), "AUTH_NOT_LOGGED_IN");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_wrong_role_display() {
        let error = AuthError::WrongRole {
            required: "teacher".to_string(),
            actual: "student".to_string(),
        };
        assert!(error.to_string().contains("requires a teacher login"));
        assert!(error.is_user_error());
    }

    #[test]
    fn test_api_error_wraps_source() {
        let error = AuthError::from(crate::api::errors::ApiError::Unauthorized {
            message: "Token expired".to_string(),
        });
        assert_eq!(error.error_code(), "AUTH_API_ERROR");
        assert!(!error.is_user_error());
    }
}
