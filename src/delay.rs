// src/delay.rs

//! Delay primitive.
//!
//! Both functions measure time on Tokio's monotonic clock, so tests can run
//! them under a paused clock.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::TaskError;

/// Suspend the current task for at least `duration`.
pub async fn delay(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Like [`delay`], but fails with [`TaskError::Cancelled`] as soon as `cancel`
/// fires instead of waiting for the full duration.
///
/// A token that is already cancelled fails immediately.
pub async fn delay_with_cancel(
    duration: Duration,
    cancel: &CancellationToken,
) -> Result<(), TaskError> {
    tokio::select! {
        biased;

        _ = cancel.cancelled() => {
            debug!(duration_ms = duration.as_millis() as u64, "delay cancelled");
            Err(TaskError::Cancelled)
        }
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn delay_waits_at_least_the_duration() {
        let start = Instant::now();
        delay(Duration::from_millis(250)).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_with_cancel_stops_early() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let res = delay_with_cancel(Duration::from_secs(10), &token).await;

        assert!(matches!(res, Err(TaskError::Cancelled)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_with_cancel_completes_without_cancellation() {
        let token = CancellationToken::new();
        let res = delay_with_cancel(Duration::from_millis(10), &token).await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn already_cancelled_token_fails_immediately() {
        let token = CancellationToken::new();
        token.cancel();
        let res = delay_with_cancel(Duration::from_secs(3600), &token).await;
        assert!(matches!(res, Err(TaskError::Cancelled)));
    }
}
