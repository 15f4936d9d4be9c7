//! Structured logging setup for the CLI.
//!
//! Logs go to stderr so that stdout carries only answers.

use bn_common::Error;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `filter` is an `EnvFilter` directive such as `warn` or
/// `bn_core=debug,info`.
pub fn init_logging(filter: &str, json: bool) -> Result<(), Error> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| Error::Config(format!("invalid log filter `{filter}`: {e}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| Error::Config(format!("logging already initialised: {e}")))
}
