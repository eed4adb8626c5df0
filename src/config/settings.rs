//! # Configuration Settings
//!
//! Defines the configuration structure for the gateway deployer.

use crate::errors::{DeployerError, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Controller name written into rendered gateways by default
pub const DEFAULT_CONTROLLER_NAME: &str = "kgateway.dev/agentgateway";

/// Main deployer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DeployerSettings {
    /// Control plane connection info handed to gateway pods
    #[validate(nested)]
    pub control_plane: ControlPlaneSettings,

    /// Default gateway image, overridable per Gateway through parameters
    #[validate(nested)]
    pub image: ImageSettings,

    /// Gateway controller name this deployer acts for
    #[validate(length(min = 1, message = "Controller name cannot be empty"))]
    pub controller_name: String,

    /// Logging of the deployer process itself
    pub logging: LoggingSettings,
}

impl Default for DeployerSettings {
    fn default() -> Self {
        Self {
            control_plane: ControlPlaneSettings::default(),
            image: ImageSettings::default(),
            controller_name: DEFAULT_CONTROLLER_NAME.to_string(),
            logging: LoggingSettings::default(),
        }
    }
}

impl DeployerSettings {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(DeployerError::from)
    }
}

/// Where gateway pods reach the control plane's xDS server
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ControlPlaneSettings {
    /// xDS server host
    #[validate(length(min = 1, message = "xDS host cannot be empty"))]
    pub xds_host: String,

    /// xDS server port
    #[validate(range(
        min = 1,
        max = 65535,
        message = "Port must be between 1 and 65535"
    ))]
    pub xds_port: u16,

    /// Whether gateway pods connect to xDS over TLS
    pub xds_tls: bool,
}

impl Default for ControlPlaneSettings {
    fn default() -> Self {
        Self {
            xds_host: "kgateway.kgateway-system.svc.cluster.local".to_string(),
            xds_port: 9977,
            xds_tls: false,
        }
    }
}

/// Default image for gateway pods
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ImageSettings {
    pub registry: String,

    #[validate(length(min = 1, message = "Image repository cannot be empty"))]
    pub repository: String,

    /// Empty means the chart's appVersion
    pub tag: String,

    pub pull_policy: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            registry: "cr.agentgateway.dev".to_string(),
            repository: "agentgateway".to_string(),
            tag: String::new(),
            pull_policy: "IfNotPresent".to_string(),
        }
    }
}

/// Log output of the deployer process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set
    pub level: String,

    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
