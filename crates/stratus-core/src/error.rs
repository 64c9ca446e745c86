//! Error types for stratus-core

use thiserror::Error;

/// Result type alias using stratus-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Stratus
#[derive(Error, Debug)]
pub enum Error {
    /// The backend rejected a resource creation request
    #[error("Resource creation rejected for {type_token} '{name}': {reason}")]
    ResourceRejected {
        type_token: String,
        name: String,
        reason: String,
    },

    /// The backend rejected a provider-function call
    #[error("Provider call rejected for '{token}': {reason}")]
    InvokeRejected { token: String, reason: String },

    /// Property serialization error
    #[error("Property serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Properties did not form an object map
    #[error("Invalid properties: {message}")]
    InvalidProperties { message: String },

    /// A resolved resource is missing an expected property
    #[error("Resource '{resource}' is missing property '{key}'")]
    MissingProperty { resource: String, key: String },

    /// An output value failed to resolve
    #[error("Output resolution failed: {reason}")]
    OutputResolution { reason: String },
}

impl Error {
    /// Create a resource rejection error
    pub fn resource_rejected(
        type_token: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ResourceRejected {
            type_token: type_token.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a provider-call rejection error
    pub fn invoke_rejected(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvokeRejected {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid properties error
    pub fn invalid_properties(message: impl Into<String>) -> Self {
        Self::InvalidProperties {
            message: message.into(),
        }
    }

    /// Create a missing property error
    pub fn missing_property(resource: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingProperty {
            resource: resource.into(),
            key: key.into(),
        }
    }

    /// Create an output resolution error
    pub fn output_resolution(reason: impl Into<String>) -> Self {
        Self::OutputResolution {
            reason: reason.into(),
        }
    }
}
