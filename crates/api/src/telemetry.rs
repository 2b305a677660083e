//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, Settings};

/// Filter used when `RUST_LOG` is not set: the configured level for every
/// target, including `tower_http`'s request spans.
pub fn default_filter(settings: &Settings) -> String {
    let level = settings.log_level.to_string().to_lowercase();
    format!("{level},tower_http={level}")
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `LOG_LEVEL`.
pub fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(settings)));

    let registry = tracing_subscriber::registry().with(filter);
    match settings.log_format {
        LogFormat::Text => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}
