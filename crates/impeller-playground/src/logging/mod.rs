//! Logging utilities.
//!
//! Every module logs through the `log` facade. This module only decides which
//! backend receives the records: `env_logger`, configured from `RUST_LOG` or an
//! explicit filter.

mod init;

pub use init::{init_logging, init_test_logging, LoggingConfig};
