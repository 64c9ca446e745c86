//! Provisioning context

use crate::backend::{Backend, CallRequest, ResourceRequest};
use crate::config::RunSettings;
use crate::error::Result;
use crate::output::Output;
use crate::property::PropertyMap;
use std::sync::Arc;
use tracing::debug;

/// The context resources are declared against.
///
/// Holds the run settings and the active [`Backend`]; declaration functions
/// receive a context and register their resources through it.
pub struct Context {
    settings: RunSettings,
    backend: Arc<dyn Backend>,
}

/// Handle to a registered resource
#[derive(Debug, Clone)]
pub struct RegisteredResource {
    /// Logical name the resource was registered under
    pub name: String,

    /// Assigned resource identifier
    pub id: Output<String>,

    /// Resolved resource state
    pub state: Output<PropertyMap>,
}

impl Context {
    /// Create a context over the given backend
    pub fn new(settings: RunSettings, backend: Arc<dyn Backend>) -> Self {
        Self { settings, backend }
    }

    /// Project name for this run
    pub fn project(&self) -> &str {
        &self.settings.project
    }

    /// Logical stack identifier for this run
    pub fn stack(&self) -> &str {
        &self.settings.stack
    }

    /// Submit a resource creation intent to the active backend.
    ///
    /// Rejections propagate immediately; the returned handle's outputs are
    /// resolved from the backend's response.
    pub async fn register_resource(
        &self,
        type_token: &str,
        name: &str,
        inputs: PropertyMap,
    ) -> Result<RegisteredResource> {
        debug!(%type_token, %name, stack = %self.settings.stack, "registering resource");

        let response = self
            .backend
            .new_resource(ResourceRequest {
                type_token: type_token.to_string(),
                name: name.to_string(),
                inputs,
            })
            .await?;

        debug!(%name, id = %response.id, "resource registered");

        Ok(RegisteredResource {
            name: name.to_string(),
            id: Output::ready(response.id),
            state: Output::ready(response.state),
        })
    }

    /// Call a provider function (e.g. an image lookup) through the backend
    pub async fn invoke(&self, token: &str, args: PropertyMap) -> Result<PropertyMap> {
        debug!(%token, stack = %self.settings.stack, "invoking provider function");

        let response = self
            .backend
            .call(CallRequest {
                token: token.to_string(),
                args,
            })
            .await?;

        Ok(response.result)
    }
}
