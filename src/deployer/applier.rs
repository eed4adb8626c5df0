//! Applies gateway parameters to Helm values and rendered objects.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{GatewayParameters, KubernetesResourceOverlay, ParametersConfig};
use crate::errors::{DeployerError, Result};

use super::objects::DeployObject;
use super::values::{HelmImage, HelmLogging, HelmValues};

/// Applies one parameters object. `None` parameters make every call a no-op.
#[derive(Debug, Clone, Copy)]
pub struct ParametersApplier<'a> {
    params: Option<&'a GatewayParameters>,
}

impl<'a> ParametersApplier<'a> {
    pub fn new(params: Option<&'a GatewayParameters>) -> Self {
        Self { params }
    }

    /// Copy every configured field onto `values`.
    ///
    /// Fields absent from the parameters keep whatever `values` already holds.
    /// Typed logging settings and `rawConfig` are written side by side; the
    /// chart decides which wins.
    pub fn apply_to_helm_values(&self, values: &mut HelmValues) {
        let Some(params) = self.params else {
            return;
        };
        apply_configs(&params.spec.configs, values);
    }

    /// Apply per-kind overlays to `objects` in place.
    ///
    /// Stops at the first object whose spec patch cannot be applied. Objects
    /// are never added, removed or reordered.
    pub fn apply_overlays_to_objects(&self, objects: &mut [DeployObject]) -> Result<()> {
        let Some(params) = self.params else {
            return Ok(());
        };
        let overlays = &params.spec.overlays;

        for object in objects.iter_mut() {
            let Some(overlay) = overlays.for_kind(object.kind()) else {
                continue;
            };
            apply_overlay(overlay, object)?;
        }

        Ok(())
    }
}

fn apply_configs(configs: &ParametersConfig, values: &mut HelmValues) {
    let gateway = values.gateway_mut();

    if let Some(image) = &configs.image {
        let target = gateway.image.get_or_insert_with(HelmImage::default);
        if let Some(registry) = &image.registry {
            target.registry = Some(registry.clone());
        }
        if let Some(repository) = &image.repository {
            target.repository = Some(repository.clone());
        }
        if let Some(tag) = &image.tag {
            target.tag = Some(tag.clone());
        }
        if let Some(pull_policy) = &image.pull_policy {
            target.pull_policy = Some(pull_policy.clone());
        }
    }

    if let Some(resources) = &configs.resources {
        gateway.resources = Some(resources.clone());
    }

    if let Some(env) = &configs.env {
        gateway.env = env.clone();
    }

    if let Some(logging) = &configs.logging {
        let target = gateway.logging.get_or_insert_with(HelmLogging::default);
        if let Some(level) = &logging.level {
            target.level = Some(level.clone());
        }
        if let Some(format) = logging.format {
            target.format = Some(format.as_str().to_string());
        }
    }

    if let Some(raw) = &configs.raw_config {
        gateway.raw_config = Some(raw.clone());
    }

    debug!(
        image = configs.image.is_some(),
        resources = configs.resources.is_some(),
        env = configs.env.as_ref().map_or(0, Vec::len),
        logging = configs.logging.is_some(),
        raw_config = configs.raw_config.is_some(),
        "Applied gateway parameters to helm values"
    );
}

fn apply_overlay(overlay: &KubernetesResourceOverlay, object: &mut DeployObject) -> Result<()> {
    // Decode and apply the patch before touching metadata so a failed patch
    // leaves the object as it was.
    if let Some(spec) = &overlay.spec {
        let patch: serde_json::Value = spec.parse().map_err(|e| {
            DeployerError::patch(
                object.kind().as_str(),
                object.name(),
                format!("invalid patch document: {}", e),
            )
        })?;
        object.merge_spec(&patch)?;
    }

    if let Some(metadata) = &overlay.metadata {
        let meta = object.metadata_mut();
        upsert(&mut meta.labels, &metadata.labels);
        upsert(&mut meta.annotations, &metadata.annotations);
    }

    debug!(
        kind = %object.kind(),
        name = %object.name(),
        spec_patched = overlay.spec.is_some(),
        "Applied overlay"
    );

    Ok(())
}

fn upsert(target: &mut Option<BTreeMap<String, String>>, entries: &BTreeMap<String, String>) {
    if entries.is_empty() {
        return;
    }
    let map = target.get_or_insert_with(BTreeMap::new);
    for (key, value) in entries {
        map.insert(key.clone(), value.clone());
    }
}
