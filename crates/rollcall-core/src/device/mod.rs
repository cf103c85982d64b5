//! Best-effort device signals attached to attendance submission.
//!
//! The backend cross-checks a student's location and WiFi network against
//! the teacher's when these are present on a mark request. Both signals are
//! value-or-absence: acquisition is time-bounded and submission proceeds
//! without whatever could not be read.

pub mod geo;
pub mod network;
pub mod types;

pub use types::{DeviceContext, GeoFix, NetworkIdentity};

use crate::config::DeviceConfig;

/// Collect all configured device signals concurrently.
pub async fn acquire_device_context(config: &DeviceConfig) -> DeviceContext {
    let (geo, network) = futures::join!(
        geo::acquire_geo_fix(config),
        network::acquire_network_identity(config)
    );

    DeviceContext { geo, network }
}
