//! # Gateway Deployer
//!
//! Pure resolution functions between a Gateway plus its parameters and what
//! gets rendered for it:
//!
//! ```text
//! Gateway ──► GatewayForDeployer ──► default HelmValues ──► parameter layers ──► chart renderer
//!                    │                      ▲
//!                    └── addresses ─► load balancer IP
//!
//! rendered objects ──► per-kind overlays (labels, annotations, spec merge patch) ──► apply
//! ```
//!
//! Nothing here talks to the cluster or runs Helm; the caller owns both.

pub mod address;
pub mod applier;
pub mod defaults;
pub mod generator;
pub mod objects;
pub mod values;

pub use address::{resolve_load_balancer_ip, AddressCandidates};
pub use applier::ParametersApplier;
pub use defaults::{container_port, DefaultValuesGenerator};
pub use generator::HelmValuesGenerator;
pub use objects::DeployObject;
pub use values::{HelmGateway, HelmImage, HelmLogging, HelmPort, HelmService, HelmValues, HelmXds};
