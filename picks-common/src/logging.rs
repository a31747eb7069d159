//! Tracing subscriber setup shared by the command-line tools

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose HTTP internals stay at warn regardless of verbosity
const QUIET_DEPENDENCIES: &[&str] = &["reqwest", "hyper"];

/// Build the default filter directive
///
/// `level` overrides the verbose/quiet choice (from the `[logging]` config section).
pub fn default_directive(verbose: bool, level: Option<&str>) -> String {
    let level = level.unwrap_or(if verbose { "debug" } else { "info" });
    let mut directive = level.to_string();
    for dep in QUIET_DEPENDENCIES {
        directive.push_str(&format!(",{}=warn", dep));
    }
    directive
}

/// Initialize tracing
///
/// `RUST_LOG` wins when set; otherwise [`default_directive`] applies.
/// Calling this twice is harmless (the second call is ignored).
pub fn init_tracing(verbose: bool, level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}
