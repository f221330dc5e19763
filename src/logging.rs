//! Logging init for the `rdiff` binary: structured lines on stderr.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,response_diff=info";

/// Install a stderr subscriber. `RUST_LOG` overrides the default filter; a
/// second call is a no-op.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info,response_diff=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
