//! Logging configuration for Gradebook.
//!
//! Logs go to stderr so report output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Builds the env filter, honoring `RUST_LOG` when present.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initializes logging to stderr.
///
/// `verbose` raises the crate's own events to `debug` on top of the env filter.
pub fn init_stderr_logging(verbose: bool) {
    let mut filter = env_filter();
    if verbose {
        if let Ok(directive) = "gradebook=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
