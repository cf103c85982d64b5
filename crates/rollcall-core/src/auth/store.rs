//! Credential file persistence
//!
//! Reads and writes the credential file with atomic operations so an
//! interrupted write never leaves a torn file behind.

use std::fs;
use std::path::Path;

use crate::auth::{errors::AuthError, types::Credentials};

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.auth.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            message = "Failed to clean up temp file after operation error"
        );
    }
}

pub fn save_credentials(credentials: &Credentials, path: &Path) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AuthError::IoError { source: e })?;
    }

    let json =
        serde_json::to_string_pretty(credentials).map_err(|e| AuthError::CredentialParseError {
            message: e.to_string(),
        })?;

    let temp_file = path.with_extension("json.tmp");

    // Write to temp file
    if let Err(e) = fs::write(&temp_file, &json) {
        cleanup_temp_file(&temp_file, &e);
        return Err(AuthError::IoError { source: e });
    }

    // Rename temp file to final location
    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(AuthError::IoError { source: e });
    }

    Ok(())
}

pub fn load_credentials(path: &Path) -> Result<Credentials, AuthError> {
    if !path.exists() {
        return Err(AuthError::NotLoggedIn);
    }

    let content = fs::read_to_string(path).map_err(|e| AuthError::IoError { source: e })?;

    serde_json::from_str(&content).map_err(|e| AuthError::CredentialParseError {
        message: e.to_string(),
    })
}

/// Remove the credential file. Returns whether a file was actually removed.
pub fn clear_credentials(path: &Path) -> Result<bool, AuthError> {
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path).map_err(|e| AuthError::IoError { source: e })?;
    Ok(true)
}
