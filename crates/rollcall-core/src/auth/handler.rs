//! Login, logout, and identity operations.

use std::path::Path;

use tracing::info;

use crate::api::{ApiClient, LoginRequest, LoginResponse, Profile};
use crate::auth::{errors::AuthError, store, types::*};

/// Authenticate against the backend and persist the issued token.
pub async fn login(
    client: &ApiClient,
    role: Role,
    email: &str,
    password: &str,
    credentials_path: &Path,
) -> Result<Credentials, AuthError> {
    info!(event = "core.auth.login_started", role = %role, email = email);

    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let response = match role {
        Role::Student => client.login_student(&request).await?,
        Role::Teacher => client.login_teacher(&request).await?,
    };

    let credentials = credentials_from(&response, role, email);

    store::save_credentials(&credentials, credentials_path)?;

    info!(event = "core.auth.login_completed", role = %role, email = email);

    Ok(credentials)
}

/// Build the credential record persisted after a successful login.
fn credentials_from(response: &LoginResponse, role: Role, email: &str) -> Credentials {
    Credentials {
        token: response.token.clone(),
        role,
        email: email.to_string(),
        display_name: response.display_name().map(str::to_string),
        logged_in_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Remove the persisted credential. Returns whether one existed.
pub fn logout(credentials_path: &Path) -> Result<bool, AuthError> {
    info!(event = "core.auth.logout_started");

    let removed = store::clear_credentials(credentials_path)?;

    if removed {
        info!(event = "core.auth.logout_completed");
    } else {
        info!(event = "core.auth.logout_not_logged_in");
    }

    Ok(removed)
}

pub fn current_credentials(credentials_path: &Path) -> Result<Credentials, AuthError> {
    store::load_credentials(credentials_path)
}

/// Load credentials and fail unless they carry the required role.
pub fn require_role(credentials_path: &Path, required: Role) -> Result<Credentials, AuthError> {
    let credentials = store::load_credentials(credentials_path)?;

    if credentials.role != required {
        return Err(AuthError::WrongRole {
            required: required.to_string(),
            actual: credentials.role.to_string(),
        });
    }

    Ok(credentials)
}

/// Fetch the logged-in user's profile from the role-scoped endpoint.
pub async fn fetch_profile(client: &ApiClient, role: Role) -> Result<Profile, AuthError> {
    let profile = match role {
        Role::Student => client.student_profile().await?,
        Role::Teacher => client.teacher_profile().await?,
    };

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_credentials_from_login_response() {
        let response: LoginResponse = serde_json::from_str(
            r#"{
                "message": "Login successful",
                "token": "jwt-value",
                "teacher": {"id": 2, "email": "prof@example.edu",
                            "full_name": "Prof Example", "designation": "Professor"}
            }"#,
        )
        .unwrap();

        let credentials = credentials_from(&response, Role::Teacher, "prof@example.edu");
        assert_eq!(credentials.token, "jwt-value");
        assert_eq!(credentials.role, Role::Teacher);
        assert_eq!(credentials.display_name.as_deref(), Some("Prof Example"));
        assert!(!credentials.logged_in_at.is_empty());
    }

    #[test]
    fn test_credentials_from_response_without_profile() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"token": "jwt-value"}"#).unwrap();

        let credentials = credentials_from(&response, Role::Student, "dev@example.com");
        assert_eq!(credentials.display_name, None);
        assert_eq!(credentials.email, "dev@example.com");
    }

    #[test]
    fn test_logout_without_login() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");

        assert!(!logout(&path).unwrap());
    }

    #[test]
    fn test_current_credentials_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");

        let result = current_credentials(&path);
        assert!(matches!(result.unwrap_err(), AuthError::NotLoggedIn));
    }

    #[test]
    fn test_require_role_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");

        let credentials = Credentials {
            token: "jwt-value".to_string(),
            role: Role::Student,
            email: "dev@example.com".to_string(),
            display_name: None,
            logged_in_at: "2025-01-01T00:00:00Z".to_string(),
        };
        store::save_credentials(&credentials, &path).unwrap();

        assert!(require_role(&path, Role::Student).is_ok());

        let result = require_role(&path, Role::Teacher);
        assert!(matches!(
            result.unwrap_err(),
            AuthError::WrongRole { required, actual }
                if required == "teacher" && actual == "student"
        ));
    }
}
