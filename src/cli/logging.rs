//! Logging setup for the command-line tool.

use tracing_subscriber::EnvFilter;

/// Build the stderr log filter.
///
/// `--verbose` forces this crate to debug on top of `RUST_LOG`. Without it a
/// set `RUST_LOG` is used as given, and only when it is unset does the crate
/// default to warnings.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let mut filter = EnvFilter::new(rust_log.unwrap_or_default());
    let directive = match (verbose, rust_log) {
        (true, _) => Some("closet=debug"),
        (false, None) => Some("closet=warn"),
        (false, Some(_)) => None,
    };
    if let Some(directive) = directive.and_then(|d| d.parse().ok()) {
        filter = filter.add_directive(directive);
    }
    filter
}

/// Install the stderr subscriber, reading `RUST_LOG` from the environment.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .try_init();
}
