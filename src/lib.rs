//! # Gateway Deployer
//!
//! Resolves what gets deployed for a Gateway API `Gateway`: the Helm values
//! for the gateway chart and the overlays applied to the rendered objects.
//!
//! ## Architecture
//!
//! ```text
//! DeployerSettings ─► HelmValuesGenerator ─► HelmValues ─► (external) helm template
//!                            ▲
//!     Gateway + GatewayParameters layers
//!
//! (external) rendered objects ─► ParametersApplier overlays ─► (external) apply
//! ```
//!
//! ## Core Components
//!
//! - **Helm value resolver**: defaults from the Gateway and control plane
//!   settings, then typed parameters and raw config layered on top
//! - **Overlay patcher**: per-kind label/annotation upserts and spec merge patches
//! - **Address resolution**: picks the single load balancer IP, if any
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gateway_deployer::{
//!     DeployerSettings, Gateway, GatewayParameters, HelmValuesGenerator, Result,
//! };
//!
//! fn render(gateway: &Gateway, params: &GatewayParameters) -> Result<String> {
//!     let settings = DeployerSettings::from_env()?;
//!     let generator = HelmValuesGenerator::new(&settings);
//!     generator.values(gateway, &[params])?.to_yaml()
//! }
//! ```

pub mod config;
pub mod deployer;
pub mod domain;
pub mod errors;
pub mod observability;

// Re-export commonly used types and traits
pub use crate::config::DeployerSettings;
pub use deployer::{
    resolve_load_balancer_ip, DeployObject, HelmValues, HelmValuesGenerator, ParametersApplier,
};
pub use domain::{
    Gateway, GatewayAddress, GatewayParameters, ParametersConfig, ParametersOverlay, RawJson,
};
pub use errors::{DeployerError, Error, Result};
pub use observability::init_logging;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_available() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "gateway-deployer");
    }
}
