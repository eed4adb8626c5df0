//! Default Helm values synthesized from a Gateway and the deployer settings.

use tracing::debug;

use crate::config::{ControlPlaneSettings, DeployerSettings, ImageSettings};
use crate::domain::GatewayForDeployer;
use crate::errors::Result;

use super::address::resolve_load_balancer_ip;
use super::values::{
    HelmGateway, HelmImage, HelmPort, HelmService, HelmValues, HelmXds, SERVICE_TYPE_LOAD_BALANCER,
};

/// Offset added to privileged listener ports so the proxy can bind them unprivileged
pub const PRIVILEGED_PORT_OFFSET: u16 = 8000;

/// Container port a listener port is served on.
///
/// Ports below 1024 move up by [`PRIVILEGED_PORT_OFFSET`]; everything else is
/// used as is.
pub fn container_port(listener_port: u16) -> u16 {
    if listener_port < 1024 {
        listener_port + PRIVILEGED_PORT_OFFSET
    } else {
        listener_port
    }
}

/// Builds the baseline values for a Gateway before any parameters apply.
#[derive(Debug, Clone)]
pub struct DefaultValuesGenerator {
    control_plane: ControlPlaneSettings,
    image: ImageSettings,
}

impl DefaultValuesGenerator {
    pub fn new(settings: &DeployerSettings) -> Self {
        Self {
            control_plane: settings.control_plane.clone(),
            image: settings.image.clone(),
        }
    }

    /// Default values for `gateway`.
    ///
    /// Fails when the Gateway's addresses cannot be turned into a single load
    /// balancer IP; see [`resolve_load_balancer_ip`].
    pub fn default_helm_values(&self, gateway: &GatewayForDeployer) -> Result<HelmValues> {
        let load_balancer_ip = resolve_load_balancer_ip(&gateway.addresses)?;

        debug!(
            gateway = %gateway.name,
            namespace = %gateway.namespace,
            ports = gateway.ports.len(),
            load_balancer_ip = load_balancer_ip.as_deref().unwrap_or(""),
            "Synthesized default helm values"
        );

        Ok(HelmValues {
            gateway: Some(HelmGateway {
                name: Some(gateway.name.clone()),
                namespace: Some(gateway.namespace.clone()),
                full_name: Some(gateway.name.clone()),
                gateway_class_name: Some(gateway.gateway_class_name.clone()),
                controller_name: Some(gateway.controller_name.clone()),
                ports: gateway
                    .ports
                    .iter()
                    .map(|&port| HelmPort {
                        port,
                        target_port: container_port(port),
                        protocol: "TCP".to_string(),
                        name: format!("listener-{}", port),
                    })
                    .collect(),
                image: Some(self.default_image()),
                service: Some(HelmService {
                    service_type: Some(SERVICE_TYPE_LOAD_BALANCER.to_string()),
                    load_balancer_ip,
                }),
                xds: Some(HelmXds {
                    host: self.control_plane.xds_host.clone(),
                    port: self.control_plane.xds_port,
                    tls: self.control_plane.xds_tls,
                }),
                ..Default::default()
            }),
        })
    }

    fn default_image(&self) -> HelmImage {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        HelmImage {
            registry: non_empty(&self.image.registry),
            repository: non_empty(&self.image.repository),
            tag: non_empty(&self.image.tag),
            pull_policy: non_empty(&self.image.pull_policy),
        }
    }
}
