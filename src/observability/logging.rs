//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install an `EnvFilter`-based subscriber.
///
/// For binaries and tests embedding the gateway; applications with their own
/// subscriber skip this. Safe to call more than once; only the first call
/// installs anything.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "render_gateway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}
