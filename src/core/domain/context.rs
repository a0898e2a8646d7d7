//! Invocation context of the current workflow run.

use crate::core::constants::TARGET_SESSION_PREFIX;
use crate::error::ConfigError;

/// Facts about the triggering workflow run, as provided by the host.
///
/// Every field is optional until a role has been admitted; the accessors
/// fail with `ConfigError::MissingContext` naming the host variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub run_id: Option<String>,
    pub event: Option<String>,
    pub workflow_ref: Option<String>,
    pub repository: Option<String>,
}

impl InvocationContext {
    pub fn run_id(&self) -> Result<&str, ConfigError> {
        require(&self.run_id, "GITHUB_RUN_ID")
    }

    pub fn event(&self) -> Result<&str, ConfigError> {
        require(&self.event, "GITHUB_EVENT_NAME")
    }

    pub fn workflow_ref(&self) -> Result<&str, ConfigError> {
        require(&self.workflow_ref, "GITHUB_WORKFLOW_REF")
    }

    pub fn repository(&self) -> Result<&str, ConfigError> {
        require(&self.repository, "GITHUB_REPOSITORY")
    }

    /// Session name of the second hop: `GHA-<run id>`.
    pub fn session_name(&self) -> Result<String, ConfigError> {
        Ok(format!("{}{}", TARGET_SESSION_PREFIX, self.run_id()?))
    }
}

fn require<'a>(value: &'a Option<String>, var: &'static str) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingContext(var))
}
