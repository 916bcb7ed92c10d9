use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Installs the stderr subscriber. `RUST_LOG` is honoured and `directive` is
/// layered on top of it. Fails if a global subscriber is already set.
pub fn init(directive: &str) -> Result<(), Error> {
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(Error::LogInit)
}

#[cfg(test)]
#[path = "../tests/src_inline/logging.rs"]
mod tests;
