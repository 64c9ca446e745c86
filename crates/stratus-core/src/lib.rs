//! # stratus-core
//!
//! Core library for Stratus providing:
//! - The provisioning context resources are declared against
//! - Asynchronously resolved output values and input wrappers
//! - The backend contract (resource registration and provider calls)
//! - Property map serialization helpers and error types

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod property;

pub use backend::{Backend, CallRequest, CallResponse, ResourceRequest, ResourceResponse};
pub use config::RunSettings;
pub use context::{Context, RegisteredResource};
pub use error::{Error, Result};
pub use output::{Input, Output};
pub use property::{from_property_map, to_property_map, PropertyMap};
