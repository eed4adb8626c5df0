//! Domain Types
//!
//! Inputs of the deployer: the Gateway being deployed and the parameters
//! attached to it or to its GatewayClass.

pub mod gateway;
pub mod parameters;
pub mod raw_json;

pub use gateway::{AddressType, Gateway, GatewayAddress, GatewayForDeployer, Listener};
pub use parameters::{
    GatewayParameters, Image, KubernetesResourceOverlay, LogFormat, LoggingParameters, ObjectKind,
    ObjectMetadataOverlay, ParametersConfig, ParametersOverlay,
};
pub use raw_json::RawJson;
