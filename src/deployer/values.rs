//! Helm values for the gateway chart.
//!
//! Mirrors the chart's `values.yaml` layout. Every field is optional and
//! omitted from the rendered values when unset so the chart defaults apply.

use k8s_openapi::api::core::v1::{EnvVar, ResourceRequirements};
use serde::{Deserialize, Serialize};

use crate::domain::RawJson;
use crate::errors::Result;

/// Service type used for gateway Services
pub const SERVICE_TYPE_LOAD_BALANCER: &str = "LoadBalancer";

/// Top-level values document handed to the chart renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<HelmGateway>,
}

impl HelmValues {
    /// Values document with an empty gateway section.
    pub fn with_gateway() -> Self {
        Self {
            gateway: Some(HelmGateway::default()),
        }
    }

    /// The gateway section, created on first use.
    pub fn gateway_mut(&mut self) -> &mut HelmGateway {
        self.gateway.get_or_insert_with(HelmGateway::default)
    }

    /// Render as a JSON values tree.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Render as YAML, the form passed to `helm template -f`.
    ///
    /// Numbers outside the 64-bit range become YAML floats; numbers that are
    /// not finite as floats are written as strings.
    pub fn to_yaml(&self) -> Result<String> {
        // Raw config only serializes through serde_json; go via the JSON tree.
        let tree = yaml_from_json(self.to_value()?);
        Ok(serde_yaml::to_string(&tree)?)
    }
}

/// Convert a JSON tree to YAML without going through `Number`'s serde impl,
/// which only JSON serializers understand.
fn yaml_from_json(value: serde_json::Value) -> serde_yaml::Value {
    use serde_json::Value as Json;
    use serde_yaml::Value as Yaml;

    match value {
        Json::Null => Yaml::Null,
        Json::Bool(b) => Yaml::Bool(b),
        Json::Number(n) => {
            if let Some(u) = n.as_u64() {
                Yaml::from(u)
            } else if let Some(i) = n.as_i64() {
                Yaml::from(i)
            } else if let Some(f) = n.as_f64() {
                Yaml::from(f)
            } else {
                Yaml::String(n.to_string())
            }
        }
        Json::String(s) => Yaml::String(s),
        Json::Array(items) => Yaml::Sequence(items.into_iter().map(yaml_from_json).collect()),
        Json::Object(map) => Yaml::Mapping(
            map.into_iter()
                .map(|(k, v)| (Yaml::String(k), yaml_from_json(v)))
                .collect(),
        ),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmGateway {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<HelmPort>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<HelmImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<HelmLogging>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<HelmService>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xds: Option<HelmXds>,

    /// Passed through untouched next to the typed fields above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_config: Option<RawJson>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_policy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmLogging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Lowercase format token (`text` or `json`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmService {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(rename = "loadBalancerIP", default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_ip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmXds {
    pub host: String,
    pub port: u16,
    pub tls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmPort {
    pub port: u16,
    pub target_port: u16,
    pub protocol: String,
    pub name: String,
}
