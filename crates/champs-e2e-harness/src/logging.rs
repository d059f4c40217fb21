//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "champs_e2e=info";

/// Installs a fmt subscriber filtered by `filter`.
///
/// An unparsable filter falls back to [`DEFAULT_LOG_FILTER`]. Calling this
/// more than once keeps the first subscriber.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|error| {
        eprintln!("invalid log filter `{filter}`: {error}; using {DEFAULT_LOG_FILTER}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
