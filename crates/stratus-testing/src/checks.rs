//! Failure-collecting checks
//!
//! A test run can report multiple independent failures: each check records
//! what it found and keeps going, so a broken ingress rule does not mask a
//! missing tag. Collection is safe under concurrent checks; pair it with
//! `tokio::join!` to settle every outstanding check before asserting.

use std::fmt;
use std::sync::{Arc, Mutex};

/// A single recorded check failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    /// Identifier of the offending resource
    pub resource: String,
    /// What the check found
    pub message: String,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.resource, self.message)
    }
}

/// Collector for independent validation failures
#[derive(Debug, Clone, Default)]
pub struct Checks {
    failures: Arc<Mutex<Vec<CheckFailure>>>,
}

impl Checks {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure against the named resource
    pub fn fail(&self, resource: impl Into<String>, message: impl Into<String>) {
        self.failures.lock().unwrap().push(CheckFailure {
            resource: resource.into(),
            message: message.into(),
        });
    }

    /// All recorded failures, in recording order
    pub fn failures(&self) -> Vec<CheckFailure> {
        self.failures.lock().unwrap().clone()
    }

    /// True when no check has failed
    pub fn is_empty(&self) -> bool {
        self.failures.lock().unwrap().is_empty()
    }

    /// Panic with every recorded failure if any check failed.
    ///
    /// Intended as the final assertion of a test, after all checks settled.
    pub fn assert_ok(&self) {
        let failures = self.failures();
        if !failures.is_empty() {
            let report = failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            panic!("{} check(s) failed:\n{report}", failures.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_multiple_failures_without_short_circuit() {
        let checks = Checks::new();
        checks.fail("web-secgrp-id", "port 22 open to the world");
        checks.fail("web-server-www-id", "missing a Name tag");

        let failures = checks.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].resource, "web-secgrp-id");
        assert_eq!(failures[1].resource, "web-server-www-id");
    }

    #[test]
    fn clones_share_the_collector() {
        let checks = Checks::new();
        let clone = checks.clone();
        clone.fail("r", "m");
        assert_eq!(checks.failures().len(), 1);
    }

    #[test]
    fn empty_collector_passes() {
        let checks = Checks::new();
        assert!(checks.is_empty());
        checks.assert_ok();
    }

    #[test]
    #[should_panic(expected = "2 check(s) failed")]
    fn assert_ok_reports_every_failure() {
        let checks = Checks::new();
        checks.fail("a", "first");
        checks.fail("b", "second");
        checks.assert_ok();
    }

    #[tokio::test]
    async fn concurrent_checks_both_record() {
        let checks = Checks::new();
        let a = checks.clone();
        let b = checks.clone();
        tokio::join!(
            async move { a.fail("a", "one") },
            async move { b.fail("b", "two") },
        );
        assert_eq!(checks.failures().len(), 2);
    }
}
