//! Teacher-side session lifecycle: create, list, stats, end.

pub mod errors;
pub mod handler;

pub use errors::SessionError;
pub use handler::NewSession;
