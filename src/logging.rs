//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events; binaries call [`init_logging`]
//! once to print them.

use tracing_subscriber::{fmt, EnvFilter};

use crate::common::{Error, Result};

/// Install a formatting subscriber filtered by `filter`.
///
/// `filter` uses `EnvFilter` directive syntax, e.g. `"debug"` or
/// `"bptree::index=trace"`.
///
/// # Errors
/// - `Error::Logging` if the filter does not parse or a global subscriber
///   is already installed
pub fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| Error::Logging(format!("invalid log filter: {}", e)))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Logging(format!("subscriber already installed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_rejected() {
        match init_logging("bptree=notalevel") {
            Err(Error::Logging(msg)) => assert!(msg.contains("invalid log filter")),
            other => panic!("Expected Logging error, got {:?}", other),
        }
    }
}
