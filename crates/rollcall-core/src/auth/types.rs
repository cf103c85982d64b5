//! Authentication state types.

use serde::{Deserialize, Serialize};

use crate::auth::errors::AuthError;

/// Which side of the backend a credential belongs to.
///
/// The backend issues role-scoped tokens: a student token is rejected on
/// teacher endpoints with a 403 and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            other => Err(AuthError::InvalidRole {
                value: other.to_string(),
            }),
        }
    }
}

/// Persisted login state, one per user on this machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub role: Role,
    pub email: String,
    pub display_name: Option<String>,
    pub logged_in_at: String,
}
