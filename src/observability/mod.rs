//! # Observability
//!
//! Structured logging for the gateway deployer.

pub mod logging;

pub use logging::{init_logging, log_settings_info};
