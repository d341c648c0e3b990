//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Filter variable; takes tracing directives such as `debug` or
/// `devshell_launch=trace`.
pub const LOG_ENV: &str = "DEVSHELL_LOG";

/// Install the global subscriber. `DEVSHELL_LOG` wins over `verbose`.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
