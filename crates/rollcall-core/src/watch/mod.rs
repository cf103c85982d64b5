//! Live session watch: token rotation and liveness in one loop.
//!
//! A teacher projecting a session runs one [`SessionWatch`]. It fetches a
//! fresh rotating token every refresh period, polls session stats on a
//! faster cadence, and emits [`WatchEvent`]s for the UI to render. The
//! refresh is fail-stop; liveness polling tolerates transient errors but
//! ends the watch on closure or auth loss.

pub mod controller;
pub mod errors;
pub mod events;
pub mod source;

pub use controller::{SessionWatch, WatchOptions};
pub use errors::WatchError;
pub use events::WatchEvent;
pub use source::WatchSource;
