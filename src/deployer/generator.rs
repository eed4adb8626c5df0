//! End-to-end resolution for one Gateway: defaults, then parameter layers.

use crate::config::DeployerSettings;
use crate::domain::{Gateway, GatewayForDeployer, GatewayParameters};
use crate::errors::Result;
use crate::resolution_span;

use super::applier::ParametersApplier;
use super::defaults::DefaultValuesGenerator;
use super::objects::DeployObject;
use super::values::HelmValues;

/// Resolves Helm values and object overlays for Gateways of one controller.
///
/// Parameter layers are applied in the order given, typically the
/// GatewayClass parameters first and the Gateway's own parameters last, so a
/// field set on the Gateway wins over the same field set on its class.
#[derive(Debug, Clone)]
pub struct HelmValuesGenerator {
    controller_name: String,
    defaults: DefaultValuesGenerator,
}

impl HelmValuesGenerator {
    pub fn new(settings: &DeployerSettings) -> Self {
        Self {
            controller_name: settings.controller_name.clone(),
            defaults: DefaultValuesGenerator::new(settings),
        }
    }

    /// Deployment view of `gateway` under this controller.
    pub fn gateway_ir(&self, gateway: &Gateway) -> GatewayForDeployer {
        GatewayForDeployer::from_gateway(gateway, self.controller_name.as_str())
    }

    /// Full Helm values for `gateway` with `layers` applied on top of the defaults.
    pub fn values(&self, gateway: &Gateway, layers: &[&GatewayParameters]) -> Result<HelmValues> {
        let span = resolution_span!(
            "helm_values",
            gateway.metadata.namespace,
            gateway.metadata.name,
            layers = layers.len()
        );
        let _entered = span.enter();

        let ir = self.gateway_ir(gateway);
        let mut values = self.defaults.default_helm_values(&ir)?;

        for &params in layers {
            let applier = ParametersApplier::new(Some(params));
            applier.apply_to_helm_values(&mut values);
        }

        Ok(values)
    }

    /// Apply each layer's overlays to the rendered `objects`, in order.
    pub fn objects_with_overlays(
        &self,
        gateway: &Gateway,
        layers: &[&GatewayParameters],
        objects: &mut [DeployObject],
    ) -> Result<()> {
        let span = resolution_span!(
            "overlays",
            gateway.metadata.namespace,
            gateway.metadata.name,
            objects = objects.len()
        );
        let _entered = span.enter();

        for &params in layers {
            let applier = ParametersApplier::new(Some(params));
            applier.apply_overlays_to_objects(objects)?;
        }

        Ok(())
    }
}
