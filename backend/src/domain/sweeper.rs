//! Background removal of expired and exhausted pastes.
//!
//! Reads already delete unavailable pastes lazily; the sweeper reclaims the
//! ones nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::domain::Error;
use crate::domain::paste_service::map_repository_error;
use crate::domain::ports::PasteRepository;

/// Periodically purges pastes that can no longer be served.
pub struct PasteSweeper<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl<R> PasteSweeper<R>
where
    R: PasteRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            repo,
            clock,
            interval,
        }
    }

    /// Purge once and return how many pastes were removed.
    pub async fn sweep_once(&self) -> Result<u64, Error> {
        let now = self.clock.utc();
        let removed = self
            .repo
            .purge_unavailable(now)
            .await
            .map_err(map_repository_error)?;
        if removed > 0 {
            info!(removed, "swept unavailable pastes");
        } else {
            debug!("sweep found nothing to remove");
        }
        Ok(removed)
    }

    /// Sweep forever at the configured interval.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = self.interval.as_secs(), "paste sweeper started");
        loop {
            ticker.tick().await;
            if let Err(error) = self.sweep_once().await {
                warn!(error = %error, "paste sweep failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{DateTime, Utc};
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPasteRepository, PasteRepositoryError};
    use crate::test_support::MutableClock;

    const NOW_MS: i64 = 1_700_000_000_000;

    fn sweeper(repo: MockPasteRepository) -> PasteSweeper<MockPasteRepository> {
        PasteSweeper::new(
            Arc::new(repo),
            Arc::new(MutableClock::at_millis(NOW_MS)),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn sweep_purges_at_clock_time() {
        let now = DateTime::<Utc>::from_timestamp_millis(NOW_MS).expect("timestamp");
        let mut repo = MockPasteRepository::new();
        repo.expect_purge_unavailable()
            .with(eq(now))
            .times(1)
            .return_once(|_| Ok(3));

        assert_eq!(sweeper(repo).sweep_once().await.expect("sweep"), 3);
    }

    #[tokio::test]
    async fn sweep_reports_storage_failure() {
        let mut repo = MockPasteRepository::new();
        repo.expect_purge_unavailable()
            .times(1)
            .return_once(|_| Err(PasteRepositoryError::connection("down")));

        let error = sweeper(repo).sweep_once().await.expect_err("sweep fails");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn run_sweeps_repeatedly() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut repo = MockPasteRepository::new();
        repo.expect_purge_unavailable().returning(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        });

        let sweeper = PasteSweeper::new(
            Arc::new(repo),
            Arc::new(MutableClock::at_millis(NOW_MS)),
            Duration::from_millis(10),
        );
        let handle = tokio::spawn(sweeper.run());
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(calls.load(Ordering::SeqCst) >= 2);
    }
}
