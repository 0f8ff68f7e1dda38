//! Logging setup for `sb`.
//!
//! Diagnostics go to stderr so stdout stays clean for `--json` output.
//! `SPRINTBOARD_LOG` takes an `EnvFilter` directive and wins over `-v`/`-q`;
//! `SPRINTBOARD_LOG_FORMAT=json` switches to JSON lines.

use std::env;
use std::io;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding an explicit filter directive.
pub const LOG_ENV: &str = "SPRINTBOARD_LOG";

/// Environment variable selecting `compact` (default) or `json` output.
pub const LOG_FORMAT_ENV: &str = "SPRINTBOARD_LOG_FORMAT";

/// Default filter directive for a verbosity level.
#[must_use]
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "sprintboard=info,sprintboard_lib=info,warn",
        2 => "sprintboard=debug,sprintboard_lib=debug,info",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let format = env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_string());
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
            .try_init()?,
        _ => registry
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }
    Ok(())
}
