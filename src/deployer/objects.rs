//! Objects rendered for a gateway deployment, tagged by kind.

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::{Service, ServiceAccount};
use k8s_openapi::api::policy::v1::PodDisruptionBudget;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::ObjectKind;
use crate::errors::{DeployerError, Result};

/// A rendered object the overlay patcher can modify.
#[derive(Debug, Clone, PartialEq)]
pub enum DeployObject {
    Deployment(Deployment),
    Service(Service),
    ServiceAccount(ServiceAccount),
    PodDisruptionBudget(PodDisruptionBudget),
    HorizontalPodAutoscaler(HorizontalPodAutoscaler),
}

impl DeployObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            DeployObject::Deployment(_) => ObjectKind::Deployment,
            DeployObject::Service(_) => ObjectKind::Service,
            DeployObject::ServiceAccount(_) => ObjectKind::ServiceAccount,
            DeployObject::PodDisruptionBudget(_) => ObjectKind::PodDisruptionBudget,
            DeployObject::HorizontalPodAutoscaler(_) => ObjectKind::HorizontalPodAutoscaler,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            DeployObject::Deployment(o) => &o.metadata,
            DeployObject::Service(o) => &o.metadata,
            DeployObject::ServiceAccount(o) => &o.metadata,
            DeployObject::PodDisruptionBudget(o) => &o.metadata,
            DeployObject::HorizontalPodAutoscaler(o) => &o.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut ObjectMeta {
        match self {
            DeployObject::Deployment(o) => &mut o.metadata,
            DeployObject::Service(o) => &mut o.metadata,
            DeployObject::ServiceAccount(o) => &mut o.metadata,
            DeployObject::PodDisruptionBudget(o) => &mut o.metadata,
            DeployObject::HorizontalPodAutoscaler(o) => &mut o.metadata,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    /// Merge-patch this object's spec with `patch`.
    ///
    /// The object is left unchanged when the patch fails.
    pub fn merge_spec(&mut self, patch: &Value) -> Result<()> {
        let kind = self.kind();
        let name = self.name().to_string();
        let fail = |message: String| DeployerError::patch(kind.as_str(), name.as_str(), message);

        let result = match self {
            DeployObject::Deployment(o) => merge_patch_spec(&mut o.spec, patch),
            DeployObject::Service(o) => merge_patch_spec(&mut o.spec, patch),
            DeployObject::PodDisruptionBudget(o) => merge_patch_spec(&mut o.spec, patch),
            DeployObject::HorizontalPodAutoscaler(o) => merge_patch_spec(&mut o.spec, patch),
            DeployObject::ServiceAccount(_) => Err("ServiceAccount has no spec to patch".into()),
        };
        result.map_err(fail)
    }
}

impl From<Deployment> for DeployObject {
    fn from(o: Deployment) -> Self {
        DeployObject::Deployment(o)
    }
}

impl From<Service> for DeployObject {
    fn from(o: Service) -> Self {
        DeployObject::Service(o)
    }
}

impl From<ServiceAccount> for DeployObject {
    fn from(o: ServiceAccount) -> Self {
        DeployObject::ServiceAccount(o)
    }
}

impl From<PodDisruptionBudget> for DeployObject {
    fn from(o: PodDisruptionBudget) -> Self {
        DeployObject::PodDisruptionBudget(o)
    }
}

impl From<HorizontalPodAutoscaler> for DeployObject {
    fn from(o: HorizontalPodAutoscaler) -> Self {
        DeployObject::HorizontalPodAutoscaler(o)
    }
}

/// RFC 7386 merge of `patch` into a typed spec, round-tripping through JSON.
///
/// A missing spec is patched as `{}`. The patch must be a JSON object and the
/// merged document must still decode as `T`.
fn merge_patch_spec<T>(spec: &mut Option<T>, patch: &Value) -> std::result::Result<(), String>
where
    T: Serialize + DeserializeOwned,
{
    if !patch.is_object() {
        return Err(format!(
            "spec patch must be a JSON object, got {}",
            json_type_name(patch)
        ));
    }

    let mut target = match spec {
        Some(current) => serde_json::to_value(&*current).map_err(|e| e.to_string())?,
        None => Value::Object(Default::default()),
    };

    json_patch::merge(&mut target, patch);

    let merged = serde_json::from_value(target).map_err(|e| e.to_string())?;
    *spec = Some(merged);
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
