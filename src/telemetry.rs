//! Tracing setup shared by the server and worker binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "contacts_api=info,tower_http=info";

/// Installs the global tracing subscriber with an env filter.
///
/// Defaults to [`DEFAULT_FILTER`]; can be overridden with the `RUST_LOG` env var.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
