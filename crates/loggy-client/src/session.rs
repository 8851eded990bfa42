//! Periodic token refresh.
//!
//! Tokens expire a fixed time after issue, so a long-lived client swaps its
//! token for a fresh one on a timer. The [`SessionManager`] owns that timer
//! as a background task with an explicit shutdown: once [`shutdown`]
//! returns, no further refresh runs.
//!
//! [`shutdown`]: SessionManager::shutdown

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use loggy_core::traits::Clock;

use crate::api::TokenRefresher;
use crate::error::ClientError;
use crate::token_store::TokenStore;

/// Result of one refresh attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Nothing stored; nothing to refresh.
    NoToken,
    /// The stored token was replaced.
    Refreshed,
    /// The server refused the token; it has been cleared.
    Rejected,
}

struct Inner {
    refresher: Arc<dyn TokenRefresher>,
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    last_refreshed_at: AtomicI64,
}

impl Inner {
    async fn refresh_once(&self) -> Result<RefreshOutcome, ClientError> {
        let Some(token) = self.store.load().await? else {
            return Ok(RefreshOutcome::NoToken);
        };

        match self.refresher.refresh(&token).await {
            Ok(fresh) => {
                self.store.save(&fresh).await?;
                self.last_refreshed_at
                    .store(self.clock.now_millis(), Ordering::SeqCst);
                debug!("Token refreshed");
                Ok(RefreshOutcome::Refreshed)
            }
            Err(e) if e.is_unauthorized() => {
                self.store.clear().await?;
                info!("Token rejected on refresh, session cleared");
                Ok(RefreshOutcome::Rejected)
            }
            Err(e) => Err(e),
        }
    }
}

/// Keeps a stored token fresh until shut down.
pub struct SessionManager {
    inner: Arc<Inner>,
    period: Duration,
    shutdown_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("period", &self.period)
            .field("store", &self.inner.store)
            .field("stopped", &*self.shutdown_tx.borrow())
            .finish()
    }
}

impl SessionManager {
    /// Default refresh period, 15 minutes.
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(15 * 60);

    /// Manager refreshing the token in `store` every `period`.
    pub fn new(
        refresher: Arc<dyn TokenRefresher>,
        store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        period: Duration,
    ) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                refresher,
                store,
                clock,
                last_refreshed_at: AtomicI64::new(0),
            }),
            period,
            shutdown_tx,
            task: Mutex::new(None),
        }
    }

    /// Refresh immediately, outside the timer.
    pub async fn refresh_now(&self) -> Result<RefreshOutcome, ClientError> {
        self.inner.refresh_once().await
    }

    /// Clock time (ms) of the last successful refresh, if any.
    pub fn last_refreshed_at(&self) -> Option<i64> {
        match self.inner.last_refreshed_at.load(Ordering::SeqCst) {
            0 => None,
            millis => Some(millis),
        }
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_stopped(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// Start the refresh task. The first refresh happens one period from now.
    ///
    /// Returns `false` if the task is already running or the manager has
    /// been shut down.
    pub async fn start(&self) -> bool {
        let mut task = self.task.lock().await;
        if task.is_some() || self.is_stopped() {
            return false;
        }

        let inner = Arc::clone(&self.inner);
        let period = self.period;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                        if let Err(e) = inner.refresh_once().await {
                            warn!(error = %e, "Token refresh failed, will retry");
                        }
                    }
                }
            }
            debug!("Session refresh task stopped");
        }));

        info!(period_secs = period.as_secs(), "Session refresh started");
        true
    }

    /// Stop the refresh task and wait for it to finish.
    ///
    /// Idempotent. After this returns no refresh runs, and `start` refuses.
    pub async fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
        if let Some(handle) = self.task.lock().await.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Session refresh task ended abnormally");
            }
        }
    }
}
