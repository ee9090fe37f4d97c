// ── Dashboard poller ──
//
// Periodic refresh of aggregate statistics and the category distribution.
// Immediate fetch on activation, then a fixed cadence until deactivated.
// Single-flight by construction: the fetch is awaited inside the tick
// loop, so a slow cycle delays the next tick rather than overlapping it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use ecollect_api::AdminClient;

use crate::error::CoreError;
use crate::model::dashboard::{CategorySummary, DashboardStats};

/// The dashboard view state, published after every poll cycle.
///
/// A failed cycle sets `last_error` but leaves the previous data and
/// `last_updated` in place -- stale numbers with a visible error beat a
/// blank screen.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub stats: Option<DashboardStats>,
    pub categories: Vec<CategorySummary>,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

struct PollerInner {
    client: Arc<AdminClient>,
    interval: Duration,
    state: watch::Sender<DashboardState>,
    cancel: CancellationToken,
}

/// Periodically refreshes [`DashboardState`] while active.
///
/// Cheaply cloneable; consumers observe through
/// [`subscribe`](Self::subscribe). Publishing to a channel nobody listens
/// to is a no-op, so a response landing after every consumer has left is
/// safely ignored.
#[derive(Clone)]
pub struct DashboardPoller {
    inner: Arc<PollerInner>,
}

impl DashboardPoller {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    pub fn new(client: Arc<AdminClient>, interval: Duration) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            inner: Arc::new(PollerInner {
                client,
                interval,
                state,
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Subscribe to state updates.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    /// Run one poll cycle: stats and category summary fetched together.
    ///
    /// Success stamps `last_updated` and clears any error; failure
    /// records the error without touching the previous data.
    pub async fn refresh_once(&self) -> Result<(), CoreError> {
        let client = &self.inner.client;
        let (stats, summary) = tokio::join!(client.get_stats(), client.get_ewaste_summary());

        match (stats, summary) {
            (Ok(stats), Ok(summary)) => {
                self.inner.state.send_modify(|state| {
                    state.stats = Some(DashboardStats::from(stats));
                    state.categories = summary.into_iter().map(CategorySummary::from).collect();
                    state.last_updated = Some(Utc::now());
                    state.last_error = None;
                });
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                let err = CoreError::from(e);
                self.inner.state.send_modify(|state| {
                    state.last_error = Some(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Spawn the poll loop: immediate first fetch, then the steady
    /// cadence. A failed cycle is logged and never stops the schedule.
    pub fn activate(&self) -> JoinHandle<()> {
        let poller = self.clone();
        tokio::spawn(async move { poller.run().await })
    }

    async fn run(&self) {
        let mut interval = tokio::time::interval(self.inner.interval);

        loop {
            tokio::select! {
                biased;
                () = self.inner.cancel.cancelled() => break,
                _ = interval.tick() => {
                    if let Err(e) = self.refresh_once().await {
                        warn!(error = %e, "dashboard poll failed");
                    }
                }
            }
        }

        debug!("dashboard poller stopped");
    }

    /// Stop the poll loop (e.g. the dashboard view was left).
    pub fn deactivate(&self) {
        self.inner.cancel.cancel();
    }
}
