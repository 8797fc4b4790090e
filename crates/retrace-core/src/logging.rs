#![forbid(unsafe_code)]

//! Logging glue.
//!
//! With the `tracing` feature, the usual `tracing` macros are re-exported so
//! hosts can log through `retrace_core::{debug, info, ...}` without naming
//! the dependency themselves. With `tracing-json`, [`init_json_logging`]
//! installs a JSON subscriber filtered by the `RETRACE_LOG` variable.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, warn};

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "RETRACE_LOG";

/// Filter used when [`LOG_FILTER_ENV`] is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
