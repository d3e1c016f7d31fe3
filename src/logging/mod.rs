//! Logging and observability
//!
//! This module provides structured logging with:
//! - Human-readable console output on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use unidb::logging::init_logging;
//! use unidb::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(engine_type = "redis", "Resolving adapter");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
