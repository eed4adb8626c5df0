//! Gateway Parameters Domain Types
//!
//! Typed configuration for a gateway deployment (`ParametersConfig`) and the
//! per-kind overlays applied to the rendered objects (`ParametersOverlay`).
//! Every field is optional: an absent field leaves whatever the deployer
//! already computed untouched.

use k8s_openapi::api::core::v1::{EnvVar, ResourceRequirements};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::raw_json::RawJson;

/// Container image override. Each part is overridable on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_policy: Option<String>,
}

/// Log output format of the gateway process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    /// Structured output
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<LogFormat>,
}

/// Typed configuration plus the raw configuration escape hatch.
///
/// `raw_config` is never reconciled with the typed fields here; both reach the
/// Helm values and the chart decides precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametersConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    /// `Some(vec![])` clears the env list, `None` leaves it alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_config: Option<RawJson>,
}

/// Kinds of objects rendered for a gateway that overlays can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Deployment,
    Service,
    ServiceAccount,
    PodDisruptionBudget,
    HorizontalPodAutoscaler,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Deployment => "Deployment",
            ObjectKind::Service => "Service",
            ObjectKind::ServiceAccount => "ServiceAccount",
            ObjectKind::PodDisruptionBudget => "PodDisruptionBudget",
            ObjectKind::HorizontalPodAutoscaler => "HorizontalPodAutoscaler",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetadataOverlay {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Overlay for one object kind: metadata upserts and a spec merge patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubernetesResourceOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMetadataOverlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<RawJson>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametersOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<KubernetesResourceOverlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<KubernetesResourceOverlay>,
    /// ServiceAccounts have no spec; only the metadata part applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<KubernetesResourceOverlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_disruption_budget: Option<KubernetesResourceOverlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_pod_autoscaler: Option<KubernetesResourceOverlay>,
}

impl ParametersOverlay {
    pub fn for_kind(&self, kind: ObjectKind) -> Option<&KubernetesResourceOverlay> {
        match kind {
            ObjectKind::Deployment => self.deployment.as_ref(),
            ObjectKind::Service => self.service.as_ref(),
            ObjectKind::ServiceAccount => self.service_account.as_ref(),
            ObjectKind::PodDisruptionBudget => self.pod_disruption_budget.as_ref(),
            ObjectKind::HorizontalPodAutoscaler => self.horizontal_pod_autoscaler.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayParametersSpec {
    #[serde(flatten)]
    pub configs: ParametersConfig,
    #[serde(flatten)]
    pub overlays: ParametersOverlay,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParametersMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// A gateway parameters resource, referenced from a GatewayClass or a Gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayParameters {
    #[serde(default)]
    pub metadata: ParametersMetadata,
    #[serde(default)]
    pub spec: GatewayParametersSpec,
}

impl GatewayParameters {
    pub fn from_configs(configs: ParametersConfig) -> Self {
        Self {
            spec: GatewayParametersSpec {
                configs,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn from_overlays(overlays: ParametersOverlay) -> Self {
        Self {
            spec: GatewayParametersSpec {
                overlays,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMETERS_JSON: &str = r#"{
        "metadata": { "name": "gw-params", "namespace": "default" },
        "spec": {
            "image": { "registry": "custom.registry.io", "tag": "v1.0.0" },
            "resources": { "limits": { "cpu": "500m", "memory": "512Mi" } },
            "env": [ { "name": "CUSTOM_VAR", "value": "custom_value" } ],
            "logging": { "format": "json" },
            "rawConfig": { "tracing": { "otlpEndpoint": "http://jaeger:4317" } },
            "deployment": {
                "metadata": { "labels": { "team": "edge" } },
                "spec": { "replicas": 3 }
            },
            "serviceAccount": { "metadata": { "annotations": { "iam": "role" } } }
        }
    }"#;

    #[test]
    fn deserializes_configs_and_overlays_side_by_side() {
        let params: GatewayParameters = serde_json::from_str(PARAMETERS_JSON).expect("parse");
        let configs = &params.spec.configs;

        let image = configs.image.as_ref().expect("image");
        assert_eq!(image.registry.as_deref(), Some("custom.registry.io"));
        assert_eq!(image.repository, None);
        assert_eq!(image.tag.as_deref(), Some("v1.0.0"));

        let resources = configs.resources.as_ref().expect("resources");
        let limits = resources.limits.as_ref().expect("limits");
        assert_eq!(limits["memory"].0, "512Mi");
        assert_eq!(configs.env.as_ref().map(Vec::len), Some(1));
        let logging = configs.logging.as_ref().expect("logging");
        assert_eq!(logging.format, Some(LogFormat::Json));
        assert!(configs.raw_config.is_some());

        let overlays = &params.spec.overlays;
        let deployment = overlays
            .for_kind(ObjectKind::Deployment)
            .expect("deployment overlay");
        let metadata = deployment.metadata.as_ref().expect("metadata");
        assert_eq!(metadata.labels["team"], "edge");
        let patch: serde_json::Value = deployment
            .spec
            .as_ref()
            .expect("spec")
            .parse()
            .expect("patch json");
        assert_eq!(patch, serde_json::json!({ "replicas": 3 }));

        assert!(overlays.for_kind(ObjectKind::ServiceAccount).is_some());
        assert!(overlays.for_kind(ObjectKind::Service).is_none());
    }

    #[test]
    fn absent_and_empty_env_are_distinct() {
        let absent: ParametersConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(absent.env, None);

        let empty: ParametersConfig = serde_json::from_str(r#"{"env": []}"#).expect("parse");
        assert_eq!(empty.env, Some(vec![]));
    }

    #[test]
    fn log_format_tokens_are_lowercase() {
        let text = serde_json::to_string(&LogFormat::Text).expect("ser");
        assert_eq!(text, "\"text\"");
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert!(serde_json::from_str::<LogFormat>("\"Text\"").is_err());
    }
}
