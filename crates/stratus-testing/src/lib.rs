//! # stratus-testing
//!
//! Test support for Stratus stacks:
//! - [`MockBackend`]: intercepts resource registrations and provider calls,
//!   synthesizing identifiers and echoing inputs without touching any cloud API
//! - [`Checks`]: collects independent validation failures without
//!   short-circuiting sibling checks
//! - [`run_with_mock`]: runs a declaration function against a mocked context

pub mod checks;
pub mod harness;
pub mod mock;

pub use checks::{CheckFailure, Checks};
pub use harness::run_with_mock;
pub use mock::{MockBackend, MockCallRecord, MockResourceRecord};
