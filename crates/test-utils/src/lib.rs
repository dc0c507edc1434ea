pub mod builders;
pub mod fake_fetcher;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Wall-clock budget for a single awaited step in a test.
pub const TEST_DEADLINE: Duration = Duration::from_secs(5);

/// Initialise tracing for tests.
///
/// Output goes through `with_test_writer()`, so it only shows up for failing
/// tests unless run with `-- --nocapture`. The filter is read from
/// `TASKFLOW_LOG` first (same variable as the binary), then `RUST_LOG`, and
/// defaults to `info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TASKFLOW_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Await `f`, panicking if it takes longer than [`TEST_DEADLINE`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    with_deadline(TEST_DEADLINE, f).await
}

/// Await `f`, panicking if it takes longer than `limit` of real time.
///
/// The deadline runs on a plain OS thread rather than on Tokio's clock. In a
/// `start_paused` test Tokio auto-advances its clock whenever the runtime is
/// idle, so a `tokio::time::timeout` would fire while the test is merely
/// waiting on a socket.
pub async fn with_deadline<F, T>(limit: Duration, f: F) -> T
where
    F: Future<Output = T>,
{
    let (expired_tx, expired_rx) = oneshot::channel::<()>();
    std::thread::spawn(move || {
        std::thread::sleep(limit);
        let _ = expired_tx.send(());
    });

    tokio::select! {
        biased;
        out = f => out,
        _ = expired_rx => panic!("test step did not finish within {limit:?} of wall-clock time"),
    }
}
