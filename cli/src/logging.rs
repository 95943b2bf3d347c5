//! Diagnostic logging setup.
//!
//! User-facing progress goes through `output`; tracing events are for
//! debugging and always go to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "QD2_LOG";

/// Filter used when `QD2_LOG` is unset or invalid.
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "warn,qd2_cli=debug" } else { "warn" }
}

/// Install the global subscriber. `--verbose` takes precedence over
/// `QD2_LOG`. Calling this twice is harmless.
pub fn init(verbose: bool, ansi: bool) {
    let filter = if verbose {
        EnvFilter::new(default_directive(true))
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .try_init();
}
