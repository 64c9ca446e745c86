//! Mock resource monitor
//!
//! Stands in for a real provisioning backend during tests: resource
//! registrations receive a synthesized identifier derived from their logical
//! name and have their inputs echoed back as state, so assertions on tags
//! and ports observe real values without any network call. Provider-function
//! calls echo their arguments unless a richer response was seeded.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use stratus_core::{
    Backend, CallRequest, CallResponse, Error, PropertyMap, ResourceRequest, ResourceResponse,
    Result,
};
use tracing::debug;

/// Record of an intercepted resource registration
#[derive(Debug, Clone)]
pub struct MockResourceRecord {
    /// Resource type token
    pub type_token: String,
    /// Logical resource name
    pub name: String,
    /// Input properties as submitted
    pub inputs: PropertyMap,
    /// Synthesized identifier handed back
    pub id: String,
}

/// Record of an intercepted provider-function call
#[derive(Debug, Clone)]
pub struct MockCallRecord {
    /// Function token
    pub token: String,
    /// Call arguments as submitted
    pub args: PropertyMap,
    /// Result handed back (seeded or echoed)
    pub result: PropertyMap,
}

/// Mock backend intercepting resource registrations and provider calls
#[derive(Default)]
pub struct MockBackend {
    /// Intercepted registrations, in order
    resources: Mutex<Vec<MockResourceRecord>>,
    /// Intercepted calls, in order
    calls: Mutex<Vec<MockCallRecord>>,
    /// Pre-seeded provider-call results by token
    seeded_calls: Mutex<HashMap<String, PropertyMap>>,
    /// Injected registration failures by logical name
    resource_failures: Mutex<HashMap<String, String>>,
    /// Injected call failures by token
    call_failures: Mutex<HashMap<String, String>>,
}

impl MockBackend {
    /// Create an empty mock backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the result for a provider-function token.
    ///
    /// Without a seed the call echoes its arguments, so lookups resolve to
    /// whatever was requested.
    pub fn seed_call(&self, token: &str, result: PropertyMap) {
        self.seeded_calls
            .lock()
            .unwrap()
            .insert(token.to_string(), result);
    }

    /// Make registration of the named resource fail
    pub fn fail_resource(&self, name: &str, reason: &str) {
        self.resource_failures
            .lock()
            .unwrap()
            .insert(name.to_string(), reason.to_string());
    }

    /// Make calls to the given token fail
    pub fn fail_call(&self, token: &str, reason: &str) {
        self.call_failures
            .lock()
            .unwrap()
            .insert(token.to_string(), reason.to_string());
    }

    /// All intercepted registrations, in order
    pub fn resource_records(&self) -> Vec<MockResourceRecord> {
        self.resources.lock().unwrap().clone()
    }

    /// All intercepted calls, in order
    pub fn call_records(&self) -> Vec<MockCallRecord> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a resource was registered under the given name
    pub fn was_registered(&self, name: &str) -> bool {
        self.resources.lock().unwrap().iter().any(|r| r.name == name)
    }

    /// Number of registrations under the given name
    pub fn registration_count(&self, name: &str) -> usize {
        self.resources
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name == name)
            .count()
    }

    /// Check if a provider function was called
    pub fn was_called(&self, token: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c.token == token)
    }

    /// Clear all records, seeds, and injected failures
    pub fn reset(&self) {
        self.resources.lock().unwrap().clear();
        self.calls.lock().unwrap().clear();
        self.seeded_calls.lock().unwrap().clear();
        self.resource_failures.lock().unwrap().clear();
        self.call_failures.lock().unwrap().clear();
    }

    /// Synthesized identifier for a logical name
    fn synthesize_id(name: &str) -> String {
        format!("{name}-id")
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn new_resource(&self, req: ResourceRequest) -> Result<ResourceResponse> {
        if let Some(reason) = self.resource_failures.lock().unwrap().get(&req.name) {
            debug!(name = %req.name, %reason, "rejecting registration");
            return Err(Error::resource_rejected(&req.type_token, &req.name, reason));
        }

        let mut resources = self.resources.lock().unwrap();

        // Idempotent per logical name within a run: repeat registrations
        // observe the first record's identifier and echoed inputs.
        if let Some(existing) = resources.iter().find(|r| r.name == req.name) {
            let existing_id = existing.id.clone();
            let existing_inputs = existing.inputs.clone();
            let response = ResourceResponse {
                id: existing_id.clone(),
                state: existing_inputs.clone(),
            };
            resources.push(MockResourceRecord {
                type_token: req.type_token,
                name: req.name,
                inputs: existing_inputs,
                id: existing_id,
            });
            return Ok(response);
        }

        let id = Self::synthesize_id(&req.name);
        debug!(name = %req.name, %id, "intercepted registration");

        resources.push(MockResourceRecord {
            type_token: req.type_token,
            name: req.name,
            inputs: req.inputs.clone(),
            id: id.clone(),
        });

        Ok(ResourceResponse {
            id,
            state: req.inputs,
        })
    }

    async fn call(&self, req: CallRequest) -> Result<CallResponse> {
        if let Some(reason) = self.call_failures.lock().unwrap().get(&req.token) {
            debug!(token = %req.token, %reason, "rejecting call");
            return Err(Error::invoke_rejected(&req.token, reason));
        }

        let result = self
            .seeded_calls
            .lock()
            .unwrap()
            .get(&req.token)
            .cloned()
            .unwrap_or_else(|| req.args.clone());

        debug!(token = %req.token, "intercepted call");

        self.calls.lock().unwrap().push(MockCallRecord {
            token: req.token,
            args: req.args,
            result: result.clone(),
        });

        Ok(CallResponse { result })
    }
}
