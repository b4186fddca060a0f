//! Tracing initialization.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call once at process startup.
///
/// `SCRIPTOIDS_QUIET=1` limits log output to warnings and above; `RUST_LOG`
/// overrides everything.
pub fn init_tracing() {
    let quiet = std::env::var("SCRIPTOIDS_QUIET").map(|v| v == "1").unwrap_or(false);
    let default_level = if quiet {
        "scriptoids=warn,scriptoids_core=warn"
    } else {
        "scriptoids=info,scriptoids_core=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init();
}
