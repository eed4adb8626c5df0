//! # Structured Logging
//!
//! Span macros and subscriber setup built on the tracing ecosystem. The
//! resolver and patcher only emit debug events; errors are returned to the
//! caller, never logged here.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{DeployerSettings, LoggingSettings};
use crate::errors::{DeployerError, Result};

/// Create a tracing span for resolving one Gateway's deployment.
///
/// ```rust,ignore
/// let span = resolution_span!("helm_values", "default", "my-gateway");
/// ```
#[macro_export]
macro_rules! resolution_span {
    ($operation:expr, $namespace:expr, $name:expr) => {
        tracing::debug_span!(
            "gateway_resolution",
            operation = %$operation,
            namespace = %$namespace,
            gateway = %$name
        )
    };
    ($operation:expr, $namespace:expr, $name:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "gateway_resolution",
            operation = %$operation,
            namespace = %$namespace,
            gateway = %$name,
            $($field)*
        )
    };
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `settings.level` when set. Fails if a global
/// subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| {
            DeployerError::config(format!("Invalid log filter '{}': {}", settings.level, e))
        })?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if settings.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    result.map_err(|e| {
        DeployerError::config_with_source("Failed to install log subscriber", Box::new(e))
    })
}

/// Log effective settings at startup
pub fn log_settings_info(settings: &DeployerSettings) {
    tracing::info!(
        controller_name = %settings.controller_name,
        xds_host = %settings.control_plane.xds_host,
        xds_port = settings.control_plane.xds_port,
        xds_tls = settings.control_plane.xds_tls,
        image_registry = %settings.image.registry,
        image_repository = %settings.image.repository,
        "Gateway deployer configuration"
    );
}
