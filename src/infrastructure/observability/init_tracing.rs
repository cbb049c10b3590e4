use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use super::TracingConfig;

/// Installs the global subscriber: JSON lines in deployed environments,
/// human-readable output otherwise.
pub fn init_tracing(config: TracingConfig, port: u16) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));
    let registry = tracing_subscriber::registry().with(env_filter);

    match config.json_format {
        true => registry
            .with(fmt::layer().json().with_current_span(true).with_line_number(true))
            .init(),
        false => registry.with(fmt::layer().with_line_number(true)).init(),
    }

    tracing::info!(
        port,
        environment = %config.environment,
        json = config.json_format,
        version = env!("CARGO_PKG_VERSION"),
        "Voice message service starting"
    );
}
