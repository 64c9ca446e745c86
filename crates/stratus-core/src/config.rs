//! Run settings: the configuration surface passed at the start of a run

use serde::{Deserialize, Serialize};

/// Identifies the project and logical stack a run declares resources for.
///
/// This is the sole configuration surface of the core: everything else
/// (backend selection included) is passed explicitly to [`crate::Context`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Project name
    pub project: String,

    /// Logical stack identifier (e.g. `dev`, `prod`, or a test stack)
    pub stack: String,
}

impl RunSettings {
    /// Create run settings for a named project and stack
    pub fn new(project: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            stack: stack.into(),
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::new("project", "stack")
    }
}
