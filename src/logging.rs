//! Logging setup for the REPL.
//!
//! Logs go to stdout alongside the prompt. Set `DEBUG_LOGGING=1` to enable
//! debug output for tempo crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Filter directives for the given debug switch
fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        // debug for tempo crates, info for dependencies
        "info,tempo=debug,tempo_core=debug"
    } else {
        "info"
    }
}

/// Initialize stdout logging. Must be called once, before the first event.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(EnvFilter::new(filter_directive(debug_logging)))
        .init();

    tracing::debug!(debug_logging, "tempo logging initialized");
}
