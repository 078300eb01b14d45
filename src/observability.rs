//! Logging setup.
//!
//! Log output goes to stderr; stdout carries the user-facing progress and the
//! output of `npm`.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::Result;

/// Level used when neither flags nor `RUST_LOG` say otherwise
pub const DEFAULT_LEVEL: &str = "warn";

/// Build an `EnvFilter` based on CLI flags and environment.
///
/// Priority: quiet flag > verbose flag > RUST_LOG env > default_level
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    if verbose > 0 {
        let level = match verbose {
            1 => "debug",
            _ => "trace",
        };
        return EnvFilter::new(level);
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber.
pub fn init_logging(quiet: bool, verbose: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(quiet, verbose, DEFAULT_LEVEL))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
        .try_init()?;

    tracing::debug!("logging initialized");
    Ok(())
}
