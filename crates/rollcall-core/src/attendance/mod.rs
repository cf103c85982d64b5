//! Student-side attendance: submission and read views.

pub mod errors;
pub mod handler;
pub mod hints;
pub mod source;

pub use errors::AttendanceError;
pub use hints::{FailureHint, classify_failure};
pub use source::SubmissionSource;
