use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "DOMAIN_RADAR_LOG";

fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "domain_radar=debug"
    } else {
        "domain_radar=warn"
    };

    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| fallback.into())
}

/// Initialize logging to stderr (through the TUI stderr buffer).
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let result = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(crate::stderr_buffer::writer)
                .with_target(false)
                .with_ansi(false),
        )
        .try_init();

    if result.is_ok() {
        tracing::debug!(verbose, "logging initialized");
    }
}
