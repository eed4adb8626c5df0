//! Gateway Domain Types
//!
//! The subset of a Gateway API `Gateway` the deployer reads, and the
//! `GatewayForDeployer` view built from it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Type of a Gateway address.
///
/// An address without a type is an IP address; see [`GatewayAddress::resolved_type`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddressType {
    IpAddress,
    Hostname,
    /// Implementation-specific address types (`example.com/custom`)
    Other(String),
}

impl AddressType {
    pub fn as_str(&self) -> &str {
        match self {
            AddressType::IpAddress => "IPAddress",
            AddressType::Hostname => "Hostname",
            AddressType::Other(other) => other,
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AddressType {
    fn from(s: &str) -> Self {
        match s {
            "IPAddress" => AddressType::IpAddress,
            "Hostname" => AddressType::Hostname,
            other => AddressType::Other(other.to_string()),
        }
    }
}

impl Serialize for AddressType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AddressType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AddressType::from(s.as_str()))
    }
}

/// An address requested for a Gateway (`spec.addresses[]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayAddress {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<AddressType>,
    pub value: String,
}

impl GatewayAddress {
    pub fn ip(value: impl Into<String>) -> Self {
        Self {
            address_type: Some(AddressType::IpAddress),
            value: value.into(),
        }
    }

    pub fn hostname(value: impl Into<String>) -> Self {
        Self {
            address_type: Some(AddressType::Hostname),
            value: value.into(),
        }
    }

    pub fn untyped(value: impl Into<String>) -> Self {
        Self {
            address_type: None,
            value: value.into(),
        }
    }

    /// The address type with the Gateway API default applied.
    pub fn resolved_type(&self) -> AddressType {
        self.address_type.clone().unwrap_or(AddressType::IpAddress)
    }
}

/// A Gateway listener; only the fields that shape the deployment are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listener {
    pub name: String,
    pub port: u16,
    pub protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayMetadata {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySpec {
    pub gateway_class_name: String,
    #[serde(default)]
    pub addresses: Vec<GatewayAddress>,
    #[serde(default)]
    pub listeners: Vec<Listener>,
}

/// A Gateway API `Gateway` as read by the deployer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    pub metadata: GatewayMetadata,
    pub spec: GatewaySpec,
}

/// Deployment-relevant view of a Gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayForDeployer {
    pub name: String,
    pub namespace: String,
    pub gateway_class_name: String,
    pub controller_name: String,
    pub addresses: Vec<GatewayAddress>,
    /// Distinct listener ports, ascending
    pub ports: Vec<u16>,
}

impl GatewayForDeployer {
    pub fn from_gateway(gateway: &Gateway, controller_name: impl Into<String>) -> Self {
        let ports: BTreeSet<u16> = gateway.spec.listeners.iter().map(|l| l.port).collect();

        Self {
            name: gateway.metadata.name.clone(),
            namespace: gateway.metadata.namespace.clone(),
            gateway_class_name: gateway.spec.gateway_class_name.clone(),
            controller_name: controller_name.into(),
            addresses: gateway.spec.addresses.clone(),
            ports: ports.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untyped_address_resolves_to_ip() {
        let untyped = GatewayAddress::untyped("192.0.2.1");
        assert_eq!(untyped.resolved_type(), AddressType::IpAddress);

        let hostname = GatewayAddress::hostname("example.com");
        assert_eq!(hostname.resolved_type(), AddressType::Hostname);
    }

    #[test]
    fn address_type_serialization() {
        let custom = r#"{"type":"example.com/custom","value":"x"}"#;
        let addr: GatewayAddress = serde_json::from_str(custom).expect("parse");
        let expected = AddressType::Other("example.com/custom".into());
        assert_eq!(addr.address_type, Some(expected));

        let untyped = r#"{"value":"192.0.2.1"}"#;
        let addr: GatewayAddress = serde_json::from_str(untyped).expect("parse");
        assert_eq!(addr.address_type, None);
        assert_eq!(serde_json::to_string(&addr).expect("serialize"), untyped);

        let addr = GatewayAddress::ip("203.0.113.10");
        let json = serde_json::to_string(&addr).expect("serialize");
        assert_eq!(json, r#"{"type":"IPAddress","value":"203.0.113.10"}"#);
    }

    #[test]
    fn ir_deduplicates_and_sorts_ports() {
        let gateway: Gateway = serde_yaml::from_str(
            r#"
metadata:
  name: gw
  namespace: default
spec:
  gatewayClassName: agentgateway
  listeners:
    - { name: https, port: 443, protocol: HTTPS, hostname: "*.example.com" }
    - { name: http, port: 8080, protocol: HTTP }
    - { name: https-alt, port: 443, protocol: HTTPS }
"#,
        )
        .expect("gateway yaml");

        let ir = GatewayForDeployer::from_gateway(&gateway, "kgateway.dev/agentgateway");
        assert_eq!(ir.name, "gw");
        assert_eq!(ir.namespace, "default");
        assert_eq!(ir.gateway_class_name, "agentgateway");
        assert_eq!(ir.controller_name, "kgateway.dev/agentgateway");
        assert_eq!(ir.ports, vec![443, 8080]);
        assert!(ir.addresses.is_empty());
    }
}
