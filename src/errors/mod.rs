//! # Error Handling
//!
//! Error types shared by the Helm value resolver, the overlay patcher and
//! address resolution. Nothing in this crate logs and swallows an error; every
//! failure is returned to the caller.

pub mod types;

pub use types::{DeployerError, Result};

/// Crate-wide alias for the main error type
pub type Error = DeployerError;
