//! Logging setup.
//!
//! The library itself only talks to the `log` facade; hosts call
//! [`init_logging`] once to install `env_logger` as the backend.

mod init;

pub use init::{init_logging, LoggingConfig};
