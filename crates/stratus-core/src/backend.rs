//! Backend contract
//!
//! The provisioning context submits creation intents and provider-function
//! calls to whichever backend is active: a real provisioning engine in
//! production, or a mock monitor under test.

use crate::error::Result;
use crate::property::PropertyMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A resource creation intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRequest {
    /// Resource type token (e.g. `aws:ec2/instance:Instance`)
    pub type_token: String,

    /// Logical resource name within the stack
    pub name: String,

    /// Resolved input properties
    pub inputs: PropertyMap,
}

/// The backend's response to a creation intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceResponse {
    /// Assigned resource identifier
    pub id: String,

    /// Resolved resource state
    pub state: PropertyMap,
}

/// A provider-function call (e.g. an image lookup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    /// Function token (e.g. `aws:ec2/getAmi:getAmi`)
    pub token: String,

    /// Call arguments
    pub args: PropertyMap,
}

/// The backend's response to a provider-function call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallResponse {
    /// Call result
    pub result: PropertyMap,
}

/// Backend trait for provisioning engines and test monitors
#[async_trait]
pub trait Backend: Send + Sync {
    /// Handle a resource creation intent
    async fn new_resource(&self, req: ResourceRequest) -> Result<ResourceResponse>;

    /// Handle a provider-function call
    async fn call(&self, req: CallRequest) -> Result<CallResponse>;
}
