//! The watch loop: rotating-token refresh coupled with liveness polling.
//!
//! One spawned task owns every timer. A single cancellation token covers
//! the whole loop, so `stop()`, a failed refresh, a closed session, and
//! auth loss all halt refresh, polling, and countdown together. Running
//! everything in one task also makes the terminal event exactly-once by
//! construction.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::types::TokenIssue;
use crate::config::WatchConfig;
use crate::watch::{errors::WatchError, events::WatchEvent, source::WatchSource};

#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Period between rotating-token fetches.
    pub token_refresh: Duration,
    /// Period between liveness stat polls.
    pub stats_poll: Duration,
}

impl WatchOptions {
    pub fn from_config(config: &WatchConfig) -> Self {
        Self {
            token_refresh: Duration::from_secs(config.token_refresh_secs()),
            stats_poll: Duration::from_secs(config.stats_poll_secs()),
        }
    }
}

/// A running watch over one attendance session.
pub struct SessionWatch {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SessionWatch {
    /// Fetch the first token and begin the refresh/liveness loop.
    ///
    /// The first fetch happens before anything is scheduled: if it fails,
    /// no task is spawned and the error is returned. On success the
    /// returned receiver yields the initial [`WatchEvent::TokenRefreshed`]
    /// followed by the live event stream.
    pub async fn start<S: WatchSource>(
        source: S,
        session_db_id: i64,
        options: WatchOptions,
    ) -> Result<(Self, mpsc::UnboundedReceiver<WatchEvent>), WatchError> {
        if options.token_refresh.is_zero() {
            return Err(WatchError::InvalidInterval {
                field: "token_refresh",
            });
        }
        if options.stats_poll.is_zero() {
            return Err(WatchError::InvalidInterval {
                field: "stats_poll",
            });
        }

        info!(
            event = "core.watch.start_started",
            session_db_id = session_db_id,
            refresh_ms = options.token_refresh.as_millis() as u64,
            poll_ms = options.stats_poll.as_millis() as u64
        );

        let issue = match source.fetch_token(session_db_id).await {
            Ok(issue) => issue,
            Err(e) => {
                warn!(
                    event = "core.watch.start_failed",
                    session_db_id = session_db_id,
                    error = %e
                );
                return Err(WatchError::StartFailed { source: e });
            }
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        // The initial token reaches the consumer through the same channel
        // as every later refresh.
        let _ = tx.send(token_event(issue));

        let task = tokio::spawn(run_watch_loop(
            source,
            session_db_id,
            options,
            tx,
            cancel.clone(),
        ));

        info!(
            event = "core.watch.start_completed",
            session_db_id = session_db_id
        );

        Ok((
            Self {
                cancel,
                task: Some(task),
            },
            rx,
        ))
    }

    /// Stop the watch. Idempotent.
    ///
    /// Returns after the loop has fully exited, at which point no further
    /// events will be emitted.
    pub async fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            debug!(event = "core.watch.stop_already_stopped");
            return;
        };

        info!(event = "core.watch.stop_started");
        self.cancel.cancel();

        if let Err(e) = task.await {
            warn!(event = "core.watch.stop_join_failed", error = %e);
        }

        info!(event = "core.watch.stop_completed");
    }

    pub fn is_stopped(&self) -> bool {
        self.task.is_none()
    }
}

impl Drop for SessionWatch {
    fn drop(&mut self) {
        // A dropped watch must not leave its loop running
        self.cancel.cancel();
    }
}

fn token_event(issue: TokenIssue) -> WatchEvent {
    let expires_in = issue.expires_in_seconds();
    WatchEvent::TokenRefreshed {
        qr_data: issue.qr_data,
        qr_code: issue.qr_code,
        subject: issue.subject,
        expires_in,
    }
}

async fn run_watch_loop<S: WatchSource>(
    source: S,
    session_db_id: i64,
    options: WatchOptions,
    events: mpsc::UnboundedSender<WatchEvent>,
    cancel: CancellationToken,
) {
    let period_secs = options.token_refresh.as_secs();
    let mut remaining_secs = period_secs;

    // The caller already fetched the first token, so the first refresh
    // tick lands one full period from now.
    let start = tokio::time::Instant::now();
    let mut refresh_timer = tokio::time::interval_at(start + options.token_refresh, options.token_refresh);
    refresh_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stats_timer = tokio::time::interval_at(start + options.stats_poll, options.stats_poll);
    stats_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut countdown_timer =
        tokio::time::interval_at(start + Duration::from_secs(1), Duration::from_secs(1));
    countdown_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        // Biased poll order: cancellation wins outright, and at a shared
        // deadline the countdown's zero tick is observed before the refresh
        // that resets it.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(event = "core.watch.loop_cancelled", session_db_id = session_db_id);
                break;
            }
            _ = countdown_timer.tick() => {
                remaining_secs = remaining_secs.saturating_sub(1);
                let _ = events.send(WatchEvent::Countdown { remaining_secs });
            }
            _ = refresh_timer.tick() => {
                match source.fetch_token(session_db_id).await {
                    Ok(issue) => {
                        remaining_secs = period_secs;
                        debug!(
                            event = "core.watch.token_refreshed",
                            session_db_id = session_db_id,
                            expires_in = issue.expires_in_seconds()
                        );
                        let _ = events.send(token_event(issue));
                    }
                    Err(e) => {
                        warn!(
                            event = "core.watch.refresh_failed",
                            session_db_id = session_db_id,
                            error = %e
                        );
                        let _ = events.send(WatchEvent::RefreshFailed {
                            message: e.message().to_string(),
                        });
                        cancel.cancel();
                        break;
                    }
                }
            }
            _ = stats_timer.tick() => {
                match source.fetch_stats(session_db_id).await {
                    Ok(stats) if !stats.is_active => {
                        info!(
                            event = "core.watch.session_closed",
                            session_db_id = session_db_id
                        );
                        let _ = events.send(WatchEvent::SessionClosed);
                        cancel.cancel();
                        break;
                    }
                    Ok(stats) => {
                        let _ = events.send(WatchEvent::StatsUpdated {
                            present: stats.present_count,
                            total: stats.total_students,
                            percentage: stats.attendance_percentage,
                        });
                    }
                    Err(e) if e.is_auth_loss() => {
                        warn!(
                            event = "core.watch.auth_lost",
                            session_db_id = session_db_id,
                            error = %e
                        );
                        let _ = events.send(WatchEvent::AuthLost {
                            message: e.message().to_string(),
                        });
                        cancel.cancel();
                        break;
                    }
                    Err(e) => {
                        // Transient poll failures never stop the watch
                        warn!(
                            event = "core.watch.stats_poll_failed",
                            session_db_id = session_db_id,
                            error = %e
                        );
                    }
                }
            }
        }
    }

    debug!(event = "core.watch.loop_exited", session_db_id = session_db_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::api::errors::ApiError;
    use crate::api::types::{SecurityFeatures, SessionStats};

    fn test_issue(n: usize) -> TokenIssue {
        TokenIssue {
            qr_code: format!("png-{}", n),
            qr_data: format!("token-{}", n),
            expires_at: "2025-01-01T10:00:06Z".to_string(),
            session_id: "CS101-1735725600".to_string(),
            subject: "CS101".to_string(),
            security_features: SecurityFeatures {
                expires_in_seconds: Some(6),
            },
        }
    }

    /// Scripted source: counts calls and fails or closes on cue.
    #[derive(Clone, Default)]
    struct FakeSource {
        token_calls: Arc<AtomicUsize>,
        stats_calls: Arc<AtomicUsize>,
        /// Token fetches with index >= n fail with a network error.
        fail_token_from: Option<usize>,
        /// Stat polls with index >= n report the session closed.
        close_stats_from: Option<usize>,
        /// Stat polls with index >= n fail with 401.
        auth_lose_stats_from: Option<usize>,
        /// Every stat poll fails with a network error.
        stats_always_fail: bool,
    }

    impl WatchSource for FakeSource {
        async fn fetch_token(&self, _session_db_id: i64) -> Result<TokenIssue, ApiError> {
            let n = self.token_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(from) = self.fail_token_from {
                if n >= from {
                    return Err(ApiError::Network {
                        message: "connection refused".to_string(),
                    });
                }
            }
            Ok(test_issue(n))
        }

        async fn fetch_stats(&self, _session_db_id: i64) -> Result<SessionStats, ApiError> {
            let n = self.stats_calls.fetch_add(1, Ordering::SeqCst);
            if self.stats_always_fail {
                return Err(ApiError::Network {
                    message: "timed out".to_string(),
                });
            }
            if let Some(from) = self.auth_lose_stats_from {
                if n >= from {
                    return Err(ApiError::Unauthorized {
                        message: "Token is not valid".to_string(),
                    });
                }
            }
            let closed = self.close_stats_from.is_some_and(|from| n >= from);
            Ok(SessionStats {
                present_count: n as i64,
                total_students: 60,
                attendance_percentage: None,
                is_active: !closed,
            })
        }
    }

    fn fast_options() -> WatchOptions {
        WatchOptions {
            token_refresh: Duration::from_millis(25),
            stats_poll: Duration::from_millis(25),
        }
    }

    /// Long enough that neither timer fires during a short test.
    fn idle_options() -> WatchOptions {
        WatchOptions {
            token_refresh: Duration::from_secs(3600),
            stats_poll: Duration::from_secs(3600),
        }
    }

    async fn collect_for(
        rx: &mut mpsc::UnboundedReceiver<WatchEvent>,
        window: Duration,
    ) -> Vec<WatchEvent> {
        let deadline = tokio::time::Instant::now() + window;
        let mut events = Vec::new();
        while let Ok(Some(event)) = tokio::time::timeout_at(deadline, rx.recv()).await {
            events.push(event);
        }
        events
    }

    async fn wait_for_terminal(rx: &mut mpsc::UnboundedReceiver<WatchEvent>) -> WatchEvent {
        loop {
            let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("timed out waiting for terminal event")
                .expect("channel closed before terminal event");
            if event.is_terminal() {
                return event;
            }
        }
    }

    #[tokio::test]
    async fn test_start_emits_initial_token_before_any_tick() {
        let source = FakeSource::default();
        let token_calls = source.token_calls.clone();

        let (mut watch, mut rx) = SessionWatch::start(source, 1, idle_options())
            .await
            .unwrap();

        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out")
            .expect("channel closed");
        assert!(
            matches!(&first, WatchEvent::TokenRefreshed { qr_data, .. } if qr_data == "token-0")
        );
        assert_eq!(token_calls.load(Ordering::SeqCst), 1);

        watch.stop().await;
    }

    #[tokio::test]
    async fn test_start_fails_when_first_fetch_fails() {
        let source = FakeSource {
            fail_token_from: Some(0),
            ..Default::default()
        };

        let result = SessionWatch::start(source, 1, idle_options()).await;
        assert!(matches!(
            result.err().unwrap(),
            WatchError::StartFailed { .. }
        ));
    }

    #[tokio::test]
    async fn test_start_rejects_zero_intervals() {
        let options = WatchOptions {
            token_refresh: Duration::ZERO,
            stats_poll: Duration::from_secs(3),
        };

        let result = SessionWatch::start(FakeSource::default(), 1, options).await;
        assert!(matches!(
            result.err().unwrap(),
            WatchError::InvalidInterval {
                field: "token_refresh"
            }
        ));
    }

    #[tokio::test]
    async fn test_refresh_loop_fetches_periodically() {
        let source = FakeSource::default();
        let (mut watch, mut rx) = SessionWatch::start(
            source,
            1,
            WatchOptions {
                token_refresh: Duration::from_millis(25),
                stats_poll: Duration::from_secs(3600),
            },
        )
        .await
        .unwrap();

        let events = collect_for(&mut rx, Duration::from_millis(120)).await;
        watch.stop().await;

        let tokens: Vec<&WatchEvent> = events
            .iter()
            .filter(|e| matches!(e, WatchEvent::TokenRefreshed { .. }))
            .collect();
        assert!(
            tokens.len() >= 3,
            "expected several refreshes, got {}",
            tokens.len()
        );
        // Each refresh produced a fresh token value
        assert!(
            matches!(tokens[0], WatchEvent::TokenRefreshed { qr_data, .. } if qr_data == "token-0")
        );
        assert!(
            matches!(tokens[1], WatchEvent::TokenRefreshed { qr_data, .. } if qr_data == "token-1")
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_stops_everything() {
        let source = FakeSource {
            fail_token_from: Some(2),
            ..Default::default()
        };
        let stats_calls = source.stats_calls.clone();

        let (mut watch, mut rx) = SessionWatch::start(source, 1, fast_options())
            .await
            .unwrap();

        let terminal = wait_for_terminal(&mut rx).await;
        assert!(matches!(
            &terminal,
            WatchEvent::RefreshFailed { message } if message == "connection refused"
        ));

        // Loop exited: channel closes with no further events
        let rest = collect_for(&mut rx, Duration::from_millis(200)).await;
        assert!(rest.is_empty(), "events after terminal: {:?}", rest);

        // Liveness polling halted with the refresh
        let polls_at_failure = stats_calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(stats_calls.load(Ordering::SeqCst), polls_at_failure);

        watch.stop().await;
    }

    #[tokio::test]
    async fn test_session_close_notifies_once_and_stops() {
        let source = FakeSource {
            close_stats_from: Some(1),
            ..Default::default()
        };
        let token_calls = source.token_calls.clone();

        let (mut watch, mut rx) = SessionWatch::start(
            source,
            1,
            WatchOptions {
                token_refresh: Duration::from_secs(3600),
                stats_poll: Duration::from_millis(25),
            },
        )
        .await
        .unwrap();

        let terminal = wait_for_terminal(&mut rx).await;
        assert_eq!(terminal, WatchEvent::SessionClosed);

        // Exactly one closure notification, then the channel closes
        let rest = collect_for(&mut rx, Duration::from_millis(200)).await;
        assert!(
            !rest.contains(&WatchEvent::SessionClosed),
            "closure notified twice"
        );
        assert!(rest.is_empty());

        // Token refresh never ran past the initial fetch
        assert_eq!(token_calls.load(Ordering::SeqCst), 1);

        watch.stop().await;
    }

    #[tokio::test]
    async fn test_transient_stats_errors_keep_the_watch_alive() {
        let source = FakeSource {
            stats_always_fail: true,
            ..Default::default()
        };

        let (mut watch, mut rx) = SessionWatch::start(source, 1, fast_options())
            .await
            .unwrap();

        let events = collect_for(&mut rx, Duration::from_millis(120)).await;

        assert!(!events.iter().any(|e| e.is_terminal()));
        let refreshes = events
            .iter()
            .filter(|e| matches!(e, WatchEvent::TokenRefreshed { .. }))
            .count();
        assert!(refreshes >= 2, "refresh should continue through poll errors");

        watch.stop().await;
    }

    #[tokio::test]
    async fn test_auth_loss_stops_watch() {
        let source = FakeSource {
            auth_lose_stats_from: Some(0),
            ..Default::default()
        };

        let (mut watch, mut rx) = SessionWatch::start(
            source,
            1,
            WatchOptions {
                token_refresh: Duration::from_secs(3600),
                stats_poll: Duration::from_millis(25),
            },
        )
        .await
        .unwrap();

        let terminal = wait_for_terminal(&mut rx).await;
        assert!(matches!(
            &terminal,
            WatchEvent::AuthLost { message } if message == "Token is not valid"
        ));

        watch.stop().await;
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let source = FakeSource::default();
        let (mut watch, _rx) = SessionWatch::start(source, 1, idle_options())
            .await
            .unwrap();

        watch.stop().await;
        assert!(watch.is_stopped());

        // Second stop is a no-op
        watch.stop().await;
        assert!(watch.is_stopped());
    }

    #[tokio::test]
    async fn test_no_new_events_after_stop() {
        let source = FakeSource::default();
        let token_calls = source.token_calls.clone();

        let (mut watch, mut rx) = SessionWatch::start(source, 1, fast_options())
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(70)).await;
        watch.stop().await;

        let fetches_at_stop = token_calls.load(Ordering::SeqCst);

        // Drain whatever was emitted before the stop; the channel must then
        // be closed, which proves nothing new can arrive.
        while let Some(event) = rx.recv().await {
            assert!(!event.is_terminal(), "stop should not emit a terminal event");
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(token_calls.load(Ordering::SeqCst), fetches_at_stop);
    }

    #[tokio::test]
    async fn test_countdown_ticks_toward_next_refresh() {
        let source = FakeSource::default();
        let (mut watch, mut rx) = SessionWatch::start(
            source,
            1,
            WatchOptions {
                token_refresh: Duration::from_secs(2),
                stats_poll: Duration::from_secs(3600),
            },
        )
        .await
        .unwrap();

        let events = collect_for(&mut rx, Duration::from_millis(1400)).await;
        watch.stop().await;

        assert!(
            events.contains(&WatchEvent::Countdown { remaining_secs: 1 }),
            "expected a countdown tick, got {:?}",
            events
        );
    }

    #[tokio::test]
    async fn test_countdown_reaches_zero_before_next_refresh() {
        let source = FakeSource::default();
        // A 1s refresh period makes the countdown tick and the refresh tick
        // share every deadline, which is exactly the ordering under test.
        let (mut watch, mut rx) = SessionWatch::start(
            source,
            1,
            WatchOptions {
                token_refresh: Duration::from_secs(1),
                stats_poll: Duration::from_secs(3600),
            },
        )
        .await
        .unwrap();

        let events = collect_for(&mut rx, Duration::from_millis(1400)).await;
        watch.stop().await;

        let zero_at = events
            .iter()
            .position(|e| matches!(e, WatchEvent::Countdown { remaining_secs: 0 }))
            .expect("countdown should reach zero");
        let second_refresh_at = events
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, WatchEvent::TokenRefreshed { .. }))
            .map(|(i, _)| i)
            .nth(1)
            .expect("a second refresh should arrive");

        assert!(
            zero_at < second_refresh_at,
            "zero tick must precede the refresh that resets it, got {:?}",
            events
        );
    }

    #[test]
    fn test_options_from_config() {
        let options = WatchOptions::from_config(&WatchConfig::default());
        assert_eq!(options.token_refresh, Duration::from_secs(6));
        assert_eq!(options.stats_poll, Duration::from_secs(3));
    }
}
