//! # Error Types
//!
//! Error types for gateway deployment resolution using `thiserror`.

/// Custom result type for deployer operations
pub type Result<T> = std::result::Result<T, DeployerError>;

/// Main error type for the gateway deployer
#[derive(thiserror::Error, Debug)]
pub enum DeployerError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Overlay spec patch could not be applied to an object
    #[error("failed to apply overlay patch to {kind} '{name}': {message}")]
    PatchApplication {
        kind: String,
        name: String,
        message: String,
    },

    /// More than one IP-typed address on a Gateway
    #[error(
        "gateway has multiple IPAddress addresses ({count}); only one load balancer IP is supported"
    )]
    MultipleAddresses { count: usize },

    /// The sole IP-typed address does not parse as an IP literal
    #[error(
        "no valid IP address found in gateway addresses: '{value}' is not an IPv4 or IPv6 address"
    )]
    NoValidIpAddress { value: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DeployerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a patch application error for the named object
    pub fn patch<K, N, M>(kind: K, name: N, message: M) -> Self
    where
        K: Into<String>,
        N: Into<String>,
        M: Into<String>,
    {
        Self::PatchApplication {
            kind: kind.into(),
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(context: S) -> Self {
        Self::Serialization {
            context: context.into(),
            source: None,
        }
    }

    /// Whether the error came from load balancer address resolution.
    ///
    /// Callers use this to mark the Gateway as not programmable instead of
    /// retrying the reconciliation.
    pub fn is_address_error(&self) -> bool {
        matches!(
            self,
            DeployerError::MultipleAddresses { .. } | DeployerError::NoValidIpAddress { .. }
        )
    }
}

impl From<serde_json::Error> for DeployerError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            context: format!("JSON serialization failed: {}", error),
            source: Some(Box::new(error)),
        }
    }
}

impl From<serde_yaml::Error> for DeployerError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Serialization {
            context: format!("YAML serialization failed: {}", error),
            source: Some(Box::new(error)),
        }
    }
}

impl From<::config::ConfigError> for DeployerError {
    fn from(error: ::config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for DeployerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_validation_messages(&errors, "", &mut messages);
        messages.sort();

        Self::validation(format!("Validation failed: {}", messages.join("; ")))
    }
}

/// Flatten nested settings errors into `path.to.field: message` entries.
fn collect_validation_messages(
    errors: &validator::ValidationErrors,
    prefix: &str,
    out: &mut Vec<String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_deref().unwrap_or("Invalid value").to_string())
                    .collect();
                out.push(format!("{}: {}", path, error_messages.join(", ")));
            }
            ValidationErrorsKind::Struct(nested) => collect_validation_messages(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}
