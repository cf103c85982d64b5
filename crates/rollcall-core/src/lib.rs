//! rollcall-core: Core library for the QR attendance session client
//!
//! This library provides the business logic for driving QR attendance
//! sessions from the terminal: rotating-token watches for teachers,
//! attendance submission for students, and the shared auth/config layers.
//!
//! # Main Entry Points
//!
//! - [`watch`] - Live session watch (token rotation + liveness polling)
//! - [`attendance`] - Submit marks, read history and dashboard views
//! - [`sessions`] - Create, list, inspect, end sessions
//! - [`auth`] - Login, logout, persisted credentials
//! - [`device`] - Best-effort geolocation and WiFi signals
//! - [`config`] - Configuration management

pub mod api;
pub mod attendance;
pub mod auth;
pub mod config;
pub mod device;
pub mod errors;
pub mod logging;
pub mod sessions;
pub mod watch;

// Re-export commonly used types at crate root for convenience
pub use api::{ApiClient, ApiError};
pub use attendance::{AttendanceError, FailureHint, SubmissionSource, classify_failure};
pub use auth::{AuthError, Credentials, Role};
pub use config::RollcallConfig;
pub use device::{DeviceContext, GeoFix, NetworkIdentity};
pub use sessions::{NewSession, SessionError};
pub use watch::{SessionWatch, WatchError, WatchEvent, WatchOptions, WatchSource};

// Re-export handler modules as the primary API
pub use attendance::handler as attendance_ops;
pub use auth::handler as auth_ops;
pub use sessions::handler as session_ops;

// Re-export logging initialization
pub use logging::init_logging;
