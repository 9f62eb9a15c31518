//! Diagnostic tracing on stderr, controlled by `RUST_LOG`.
//!
//! The `[HH:MM:SS]` progress lines users read go through
//! [`crate::io::report::Reporter`] on stdout and are never filtered.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or does not parse.
pub const DEFAULT_DIRECTIVE: &str = "envboot=warn";

fn filter_from(value: Option<&str>) -> EnvFilter {
    value
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Later calls are no-ops.
///
/// ```bash
/// RUST_LOG=envboot=debug envboot --dry-run
/// ```
pub fn init() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
