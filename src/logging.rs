//! Tracing setup for the CLI binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g. `debug` or `folio=trace`.
pub const LOG_ENV: &str = "FOLIO_LOG";

/// Filter used when `FOLIO_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `FOLIO_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Call once near the start of `main`. Logs go to stderr so command output
/// on stdout stays clean.
pub fn init_tracing() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter());

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
