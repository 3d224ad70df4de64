//! Logging utilities.
//!
//! Host code logs through the `log` facade; this module only installs the
//! `env_logger` backend. Fatal startup errors are reported here, since there
//! is no end-user error surface.

mod init;

pub use init::{init_logging, LoggingConfig};
