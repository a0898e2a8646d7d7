//! Second-hop role selection.
//!
//! Production assumes exactly the role the caller asked for. Development may
//! redirect to a role from `TARGET_ROLE_ARN`. The strategy is picked once by
//! [`select`].

use tracing::{debug, warn};

use crate::core::config::Mode;
use crate::core::constants::TARGET_ROLE_OVERRIDE_VAR;
use crate::core::domain::RoleArn;
use crate::error::{ConfigError, Result};

/// Decides which role the tagged assumption targets.
pub trait RoleResolver: Send + Sync {
    fn resolve(&self, requested: &RoleArn) -> Result<RoleArn>;
}

/// Select the role resolver for a mode.
pub fn select(mode: Mode) -> Box<dyn RoleResolver> {
    match mode {
        Mode::Production => Box::new(RequestedRole),
        Mode::Development => Box::new(OverrideRole::from_env()),
    }
}

/// Uses the caller-requested role unchanged.
#[derive(Debug, Default)]
pub struct RequestedRole;

impl RoleResolver for RequestedRole {
    fn resolve(&self, requested: &RoleArn) -> Result<RoleArn> {
        Ok(requested.clone())
    }
}

/// Replaces the requested role with a locally configured one, when set.
#[derive(Debug, Default)]
pub struct OverrideRole {
    role: Option<String>,
}

impl OverrideRole {
    pub fn new(role: Option<String>) -> Self {
        Self { role }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(TARGET_ROLE_OVERRIDE_VAR).ok())
    }
}

impl RoleResolver for OverrideRole {
    fn resolve(&self, requested: &RoleArn) -> Result<RoleArn> {
        match self.role.as_deref().filter(|r| !r.is_empty()) {
            Some(raw) => {
                let role = RoleArn::parse(raw).map_err(|e| ConfigError::InvalidValue {
                    field: TARGET_ROLE_OVERRIDE_VAR,
                    reason: e.to_string(),
                })?;
                warn!(requested = %requested, role = %role, "development mode: target role overridden");
                Ok(role)
            }
            None => {
                debug!("no target role override, using requested role");
                Ok(requested.clone())
            }
        }
    }
}
