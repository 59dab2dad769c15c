//! Background expiry of overdue search requests.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{error, info};

use inlive_database::repositories::SearchRequestRepository;

/// How often overdue requests are swept.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Periodically marks active search requests whose `expires_at` has passed
/// as expired.
pub struct ExpirationSweeper {
    search_requests: SearchRequestRepository,
    interval: Duration,
}

impl ExpirationSweeper {
    pub fn new(search_requests: SearchRequestRepository) -> Self {
        Self {
            search_requests,
            interval: SWEEP_INTERVAL,
        }
    }

    /// Override the sweep interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run until the shutdown signal fires. Sweep failures are logged and
    /// retried on the next tick.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        // the first tick completes immediately; skip it so startup does not
        // race the migration runner
        ticker.tick().await;

        info!(interval_secs = self.interval.as_secs(), "expiration sweeper started");
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.search_requests.expire_overdue(Utc::now()).await {
                        Ok(expired) if !expired.is_empty() => {
                            info!(count = expired.len(), ids = ?expired, "expired overdue search requests");
                        }
                        Ok(_) => {}
                        Err(e) => error!(error = %e, "search request expiry sweep failed"),
                    }
                }
                _ = shutdown.changed() => {
                    info!("expiration sweeper stopping");
                    break;
                }
            }
        }
    }
}
