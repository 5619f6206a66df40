use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppMode;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
///
/// Debug mode logs human-readable lines; release mode logs JSON at `info`.
pub fn init_tracing(mode: AppMode) {
    let default_filter = match mode {
        AppMode::Debug => "calendar_api=debug,calendar_db=debug,seed_events=debug,tower_http=debug",
        AppMode::Release => "calendar_api=info,seed_events=info,tower_http=info",
    };

    let (pretty, json) = match mode {
        AppMode::Debug => (Some(fmt::layer()), None),
        AppMode::Release => (None, Some(fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(pretty)
        .with(json)
        .init();
}
