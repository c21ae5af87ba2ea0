//! Shared helpers for `checkrun` integration tests.

pub mod builders;
pub mod fake_backend;
pub mod http_stub;
pub mod reporter;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use checkrun::logging::{LOG_ENV_VAR, filter_directive};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a test-captured subscriber once per test binary.
///
/// Uses the same `CHECKRUN_LOG` directive as the binary, so
/// `CHECKRUN_LOG=debug cargo test -- --nocapture` shows engine logs.
pub fn init_tracing() {
    INIT.call_once(|| {
        let directive = filter_directive(None, std::env::var(LOG_ENV_VAR).ok());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(directive))
            .with_test_writer()
            .try_init();
    });
}

/// Await `f`, panicking if it takes longer than ten seconds.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(10), f)
        .await
        .expect("test timed out after 10 seconds")
}
