//! Events emitted by a running session watch.

/// One observable moment in a watch's lifetime.
///
/// Events arrive on the receiver handed back by
/// [`SessionWatch::start`](crate::watch::SessionWatch::start) in the order
/// they occurred. After a terminal event the loop exits and the channel
/// closes; nothing follows.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// A fresh rotating token was fetched from the backend.
    TokenRefreshed {
        /// Opaque token value. Never interpreted client-side.
        qr_data: String,
        /// Base64-encoded PNG rendering of the token.
        qr_code: String,
        subject: String,
        /// Server-declared token lifetime in seconds.
        expires_in: u64,
    },

    /// Cosmetic once-a-second tick: seconds until the next refresh.
    ///
    /// Derived from the configured refresh period, not from server expiry.
    Countdown { remaining_secs: u64 },

    /// Fresh liveness stats from a successful poll.
    StatsUpdated {
        present: i64,
        total: i64,
        percentage: Option<f64>,
    },

    /// The session was ended on the backend. Terminal.
    SessionClosed,

    /// Stored credentials stopped being accepted. Terminal.
    AuthLost { message: String },

    /// A rotating-token fetch failed. Terminal.
    RefreshFailed { message: String },
}

impl WatchEvent {
    /// Whether this event ends the watch.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WatchEvent::SessionClosed
                | WatchEvent::AuthLost { .. }
                | WatchEvent::RefreshFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_events() {
        assert!(WatchEvent::SessionClosed.is_terminal());
        assert!(
            WatchEvent::AuthLost {
                message: "Token expired".to_string()
            }
            .is_terminal()
        );
        assert!(
            WatchEvent::RefreshFailed {
                message: "connection refused".to_string()
            }
            .is_terminal()
        );
    }

    #[test]
    fn test_non_terminal_events() {
        assert!(!WatchEvent::Countdown { remaining_secs: 3 }.is_terminal());
        assert!(
            !WatchEvent::StatsUpdated {
                present: 10,
                total: 60,
                percentage: None
            }
            .is_terminal()
        );
    }
}
