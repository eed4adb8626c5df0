//! Opaque JSON documents
//!
//! `RawJson` carries user-supplied JSON through the deployer without
//! interpreting it. Raw gateway configuration and overlay spec patches both
//! use it.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;

use crate::errors::{DeployerError, Result};

/// Opaque JSON bytes, kept exactly as supplied.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RawJson(Bytes);

impl RawJson {
    /// Wrap bytes without parsing them.
    pub fn new(raw: impl Into<Bytes>) -> Self {
        Self(raw.into())
    }

    /// The exact bytes this document was built from.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode the document into `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.0).map_err(DeployerError::from)
    }
}

impl From<&'static str> for RawJson {
    fn from(raw: &'static str) -> Self {
        Self(Bytes::from_static(raw.as_bytes()))
    }
}

impl From<String> for RawJson {
    fn from(raw: String) -> Self {
        Self(Bytes::from(raw))
    }
}

impl From<Vec<u8>> for RawJson {
    fn from(raw: Vec<u8>) -> Self {
        Self(Bytes::from(raw))
    }
}

impl fmt::Debug for RawJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawJson")
            .field(&String::from_utf8_lossy(&self.0))
            .finish()
    }
}

impl Serialize for RawJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // Only JSON serializers (including serde_json::Value) understand RawValue.
        let raw: &RawValue = serde_json::from_slice(&self.0)
            .map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawJson {
    /// Re-encodes the incoming document compactly. Key order and number
    /// literals survive (`preserve_order`, `arbitrary_precision`); only
    /// insignificant whitespace is dropped.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        serde_json::to_vec(&value)
            .map(|bytes| Self(Bytes::from(bytes)))
            .map_err(serde::de::Error::custom)
    }
}
