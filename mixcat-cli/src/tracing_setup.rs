//! Tracing setup for the mixcat CLI
//!
//! Usage:
//!   mixcat --debug serve              # Debug logging to console
//!   RUST_LOG=mixcat=debug mixcat ...  # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize console tracing.
///
/// `debug` sets the default level to debug unless RUST_LOG is explicitly
/// set.
pub fn init(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
