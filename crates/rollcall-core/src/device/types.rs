//! Device signal types.

/// One acquired coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Identity of the WiFi network the device is currently on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkIdentity {
    pub ssid: String,
    pub bssid: Option<String>,
}

/// Everything the device could report about itself at marking time.
///
/// Both signals are value-or-absence: acquisition failures, timeouts, and
/// disabled sources all collapse to `None` and never block a mark attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceContext {
    pub geo: Option<GeoFix>,
    pub network: Option<NetworkIdentity>,
}

impl DeviceContext {
    pub fn is_empty(&self) -> bool {
        self.geo.is_none() && self.network.is_none()
    }
}
