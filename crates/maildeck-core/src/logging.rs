//! Logging setup.
//!
//! Tracing output goes to stderr and is disabled unless MAILDECK_LOG is set,
//! so log lines never land inside the drawn TUI region.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// Filter comes from the MAILDECK_LOG env var (e.g. `maildeck_tui=debug`);
/// defaults to off. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env("MAILDECK_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
