// ABOUTME: Tracing subscriber setup for the CLI
// ABOUTME: Env-filtered fmt output on stderr so command output stays clean

use emspay_config::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; an invalid filter falls back to the default level.
///
/// Returns false when a subscriber was already installed.
pub fn init(filter: &str) -> bool {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
        return false;
    }

    true
}
