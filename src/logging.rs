//! Tracing setup for embedding applications

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with an env-filter.
///
/// Respects `RUST_LOG`; defaults to debug output for this crate.
/// Safe to call once per process; intended for binaries and tests
/// embedding the client.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
