//! Integration tests for deployer settings loaded from the environment.

use gateway_deployer::config::{DeployerSettings, DEFAULT_CONTROLLER_NAME};
use gateway_deployer::deployer::HelmValuesGenerator;
use gateway_deployer::domain::Gateway;
use gateway_deployer::{DeployerError, Result};
use std::env;
use std::sync::Mutex;

// Serializes tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const VARS: &[&str] = &[
    "GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_HOST",
    "GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_PORT",
    "GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_TLS",
    "GATEWAY_DEPLOYER__IMAGE__REGISTRY",
    "GATEWAY_DEPLOYER__IMAGE__TAG",
    "GATEWAY_DEPLOYER__CONTROLLER_NAME",
];

/// Runs `f` with `vars` set and every other deployer variable removed,
/// restoring the original environment afterwards.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let original: Vec<(&str, Option<String>)> = VARS
        .iter()
        .map(|name| (*name, env::var(name).ok()))
        .collect();
    for name in VARS {
        env::remove_var(name);
    }
    for (name, value) in vars {
        env::set_var(name, value);
    }

    let result = f();

    for (name, value) in original {
        match value {
            Some(value) => env::set_var(name, value),
            None => env::remove_var(name),
        }
    }

    result
}

fn gateway() -> Result<Gateway> {
    let gateway = serde_json::from_value(serde_json::json!({
        "metadata": { "name": "edge", "namespace": "infra" },
        "spec": { "gatewayClassName": "agentgateway" }
    }))?;
    Ok(gateway)
}

#[test]
fn test_settings_defaults_integration() -> Result<()> {
    let settings = with_env(&[], DeployerSettings::from_env)?;

    assert_eq!(
        settings.control_plane.xds_host,
        "kgateway.kgateway-system.svc.cluster.local"
    );
    assert_eq!(settings.control_plane.xds_port, 9977);
    assert!(!settings.control_plane.xds_tls);
    assert_eq!(settings.image.registry, "cr.agentgateway.dev");
    assert_eq!(settings.controller_name, DEFAULT_CONTROLLER_NAME);
    Ok(())
}

#[test]
fn test_settings_environment_integration() -> Result<()> {
    let settings = with_env(
        &[
            ("GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_HOST", "xds.internal"),
            ("GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_PORT", "18001"),
            ("GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_TLS", "true"),
            ("GATEWAY_DEPLOYER__IMAGE__REGISTRY", "registry.example.com"),
            ("GATEWAY_DEPLOYER__IMAGE__TAG", "v1.2.3"),
        ],
        DeployerSettings::from_env,
    )?;

    assert_eq!(settings.control_plane.xds_host, "xds.internal");
    assert_eq!(settings.control_plane.xds_port, 18001);
    assert!(settings.control_plane.xds_tls);
    assert_eq!(settings.image.registry, "registry.example.com");
    assert_eq!(settings.image.tag, "v1.2.3");
    // unset sections keep defaults
    assert_eq!(settings.image.repository, "agentgateway");
    Ok(())
}

#[test]
fn test_numeric_looking_tag_stays_a_string() -> Result<()> {
    let settings = with_env(
        &[("GATEWAY_DEPLOYER__IMAGE__TAG", "1.10")],
        DeployerSettings::from_env,
    )?;
    assert_eq!(settings.image.tag, "1.10");

    let values = HelmValuesGenerator::new(&settings).values(&gateway()?, &[])?;
    let image = values.gateway.and_then(|g| g.image).expect("image values");
    assert_eq!(image.tag.as_deref(), Some("1.10"));
    Ok(())
}

#[test]
fn test_settings_invalid_port() {
    let result = with_env(
        &[("GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_PORT", "invalid")],
        DeployerSettings::from_env,
    );
    assert!(matches!(result, Err(DeployerError::Config { .. })));

    let result = with_env(
        &[("GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_PORT", "0")],
        DeployerSettings::from_env,
    );
    let err = result.unwrap_err();
    assert!(matches!(err, DeployerError::Validation { .. }), "{err}");
    assert!(err.to_string().contains("control_plane.xds_port"));
}

#[test]
fn test_settings_empty_controller_name_rejected() {
    let result = with_env(
        &[("GATEWAY_DEPLOYER__CONTROLLER_NAME", "")],
        DeployerSettings::from_env,
    );
    assert!(result.is_err());
}

#[test]
fn test_environment_settings_flow_into_helm_values() -> Result<()> {
    let settings = with_env(
        &[
            ("GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_HOST", "xds.internal"),
            ("GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_PORT", "18001"),
            ("GATEWAY_DEPLOYER__IMAGE__TAG", "v1.2.3"),
        ],
        DeployerSettings::from_env,
    )?;

    let values = HelmValuesGenerator::new(&settings).values(&gateway()?, &[])?;
    let helm = values.gateway.expect("gateway values");
    let xds = helm.xds.expect("xds values");
    assert_eq!(xds.host, "xds.internal");
    assert_eq!(xds.port, 18001);
    assert_eq!(helm.image.and_then(|i| i.tag).as_deref(), Some("v1.2.3"));
    Ok(())
}
