//! Logging setup.
//!
//! Library code only talks to the `log` facade; `init_logging` wires up
//! `env_logger` for binaries and tests that want to see layout diagnostics.

mod init;

pub use init::{init_logging, LoggingConfig};
