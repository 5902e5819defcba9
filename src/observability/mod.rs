//! # Observability
//!
//! Diagnostics go to stderr through `tracing`. Stdout carries only the
//! progress output and usage text, so the two never interleave in a pipe.

pub mod logging;

pub use logging::{init_logging, log_config_info, DEFAULT_LOG_FILTER};
