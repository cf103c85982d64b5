//! Credential lifecycle: login, persisted bearer token, logout.
//!
//! Tokens are stored in a single JSON file under the rollcall directory.
//! Every authenticated command loads the file, attaches the token as a
//! bearer credential, and surfaces [`AuthError::NotLoggedIn`] when absent.

pub mod errors;
pub mod handler;
pub mod store;
pub mod types;

pub use errors::AuthError;
pub use types::{Credentials, Role};
