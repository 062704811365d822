//! Background worker that persists click events.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Attempts per click, including the first one.
const MAX_ATTEMPTS: usize = 3;

/// Consumes click events until every sender is dropped.
///
/// Each event is written in its own task; at most `concurrency` writes are in
/// flight. Transient database errors are retried with jittered exponential
/// backoff. A click whose link has meanwhile been deleted is not retried.
///
/// Returns once the channel is closed and all in-flight writes have finished.
pub async fn run_click_worker<S>(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<S>,
    concurrency: usize,
) where
    S: StatsRepository + 'static,
{
    let concurrency = u32::try_from(concurrency.max(1)).unwrap_or(u32::MAX);
    let permits = Arc::new(Semaphore::new(concurrency as usize));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tokio::spawn(async move {
            let _permit = permit;
            process_click(repository.as_ref(), event).await;
        });
    }

    // Holding every permit means no write is in flight.
    if permits.acquire_many(concurrency).await.is_err() {
        tracing::warn!("Click worker stopped before in-flight writes drained");
        return;
    }
    tracing::info!("Click worker stopped");
}

async fn process_click<S: StatsRepository>(repository: &S, event: ClickEvent) {
    let link_id = event.link_id;
    let new_click: NewClick = event.into();

    let strategy = ExponentialBackoff::from_millis(10)
        .map(jitter)
        .take(MAX_ATTEMPTS - 1);

    let result = Retry::spawn(strategy, || {
        let new_click = new_click.clone();
        async move {
            match repository.record_click(new_click).await {
                // Missing link: retrying cannot help.
                Err(AppError::Validation { .. }) => Ok(false),
                Err(e) => Err(e),
                Ok(_) => Ok(true),
            }
        }
    })
    .await;

    match result {
        Ok(true) => {
            metrics::counter!("shorty_clicks_recorded_total").increment(1);
            tracing::debug!(link_id, "Click recorded");
        }
        Ok(false) => {
            metrics::counter!("shorty_clicks_orphaned_total").increment(1);
            tracing::debug!(link_id, "Click dropped, link no longer exists");
        }
        Err(e) => {
            metrics::counter!("shorty_clicks_failed_total").increment(1);
            tracing::warn!(link_id, error = %e, "Failed to record click");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Click;
    use crate::domain::repositories::MockStatsRepository;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn click_for(new_click: &NewClick) -> Click {
        Click {
            id: 1,
            link_id: new_click.link_id,
            clicked_at: Utc::now(),
            user_agent: new_click.user_agent.clone(),
            referer: new_click.referer.clone(),
            ip: new_click.ip.clone(),
        }
    }

    #[tokio::test]
    async fn test_worker_records_all_events() {
        let mut mock_repo = MockStatsRepository::new();
        mock_repo
            .expect_record_click()
            .times(3)
            .returning(|c| Ok(click_for(&c)));

        let (tx, rx) = mpsc::channel(10);
        for id in 1..=3 {
            tx.send(ClickEvent::new(id, None, Some("test"), None))
                .await
                .unwrap();
        }
        drop(tx);

        run_click_worker(rx, Arc::new(mock_repo), 2).await;
    }

    #[tokio::test]
    async fn test_worker_returns_after_in_flight_writes() {
        let written = Arc::new(AtomicUsize::new(0));
        let counter = written.clone();

        let mut mock_repo = MockStatsRepository::new();
        mock_repo.expect_record_click().times(5).returning(move |c| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(click_for(&c))
        });

        let (tx, rx) = mpsc::channel(10);
        for id in 1..=5 {
            tx.send(ClickEvent::new(id, None, None, None)).await.unwrap();
        }
        drop(tx);

        run_click_worker(rx, Arc::new(mock_repo), 3).await;

        assert_eq!(written.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_transient_error_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut mock_repo = MockStatsRepository::new();
        mock_repo.expect_record_click().times(2).returning(move |c| {
            if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::internal("Database error", json!({})))
            } else {
                Ok(click_for(&c))
            }
        });

        process_click(&mock_repo, ClickEvent::new(9, None, None, None)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_link_is_not_retried() {
        let mut mock_repo = MockStatsRepository::new();
        mock_repo
            .expect_record_click()
            .times(1)
            .returning(|_| Err(AppError::bad_request("Link does not exist", json!({}))));

        process_click(&mock_repo, ClickEvent::new(404, None, None, None)).await;
    }

    #[tokio::test]
    async fn test_persistent_error_gives_up() {
        let mut mock_repo = MockStatsRepository::new();
        mock_repo
            .expect_record_click()
            .times(MAX_ATTEMPTS)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        process_click(&mock_repo, ClickEvent::new(1, None, None, None)).await;
    }
}
