//! Tracing setup for the sql_access CLI.
//!
//! Logs go to stderr so command output on stdout stays parseable.
//!
//! Usage:
//!   sql_access --debug ...                               # Statements and warnings
//!   RUST_LOG=sql_access::statement=debug sql_access ...  # Fine-grained log control

use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Initialize console tracing.
///
/// `RUST_LOG` wins when set; otherwise `debug` enables debug level and the
/// default is `warn`.
pub fn init_tracing(debug: bool) -> Result<(), Box<dyn Error>> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| format!("Failed to initialise logging: {}", err).into())
}
