//! # Configuration Management
//!
//! Deployer settings are layered with the `config` crate: built-in defaults,
//! then an optional file, then `GATEWAY_DEPLOYER__*` environment variables
//! (`__` separates nesting, e.g. `GATEWAY_DEPLOYER__CONTROL_PLANE__XDS_PORT`).

pub mod settings;

pub use settings::{
    ControlPlaneSettings, DeployerSettings, ImageSettings, LoggingSettings, DEFAULT_CONTROLLER_NAME,
};

use crate::errors::Result;
use std::path::Path;

/// Environment variable prefix for deployer settings
pub const ENV_PREFIX: &str = "GATEWAY_DEPLOYER";

impl DeployerSettings {
    /// Load settings from defaults and the environment.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load settings from defaults, an optional file and the environment.
    ///
    /// Later sources win. The result is validated before it is returned.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = file {
            let file = ::config::File::from(path).required(true);
            builder = builder.add_source(file);
        }

        // Values stay strings until deserialization so tags like `1.10` are
        // not coerced to numbers; typed fields parse them there.
        let settings: DeployerSettings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        tracing::debug!(
            xds_host = %settings.control_plane.xds_host,
            xds_port = settings.control_plane.xds_port,
            xds_tls = settings.control_plane.xds_tls,
            "Loaded deployer settings"
        );

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let yaml = r#"
control_plane:
  xds_host: xds.example.com
  xds_port: 9443
  xds_tls: true
image:
  tag: v1.2.3
"#;
        file.write_all(yaml.as_bytes()).unwrap();

        let settings = DeployerSettings::load(Some(file.path())).unwrap();
        assert_eq!(settings.control_plane.xds_host, "xds.example.com");
        assert_eq!(settings.control_plane.xds_port, 9443);
        assert!(settings.control_plane.xds_tls);
        assert_eq!(settings.image.tag, "v1.2.3");
        // untouched sections keep their defaults
        assert_eq!(settings.image.repository, "agentgateway");
        assert_eq!(settings.controller_name, DEFAULT_CONTROLLER_NAME);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/deployer.yaml");
        let result = DeployerSettings::load(Some(path));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "control_plane:\n  xds_host: \"\"\n").unwrap();

        let err = DeployerSettings::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Validation error"));
    }
}
