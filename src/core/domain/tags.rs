//! Session tags attached to the second hop.

use crate::core::constants::{TAG_EVENT, TAG_REF, TAG_REPO};
use crate::core::domain::InvocationContext;
use crate::error::ConfigError;

/// Provenance tags for the tagged role assumption.
///
/// Keys are fixed (`event`, `ref`, `repo`, in that order) and every key is
/// declared transitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTags {
    tags: Vec<(&'static str, String)>,
}

impl SessionTags {
    /// Build tags from the run's triggering event, workflow ref and repository.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingContext` if any of the three is unset.
    pub fn from_context(context: &InvocationContext) -> Result<Self, ConfigError> {
        Ok(Self {
            tags: vec![
                (TAG_EVENT, context.event()?.to_string()),
                (TAG_REF, context.workflow_ref()?.to_string()),
                (TAG_REPO, context.repository()?.to_string()),
            ],
        })
    }

    /// Key/value pairs, in attachment order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.tags.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Keys that must carry over to any further chained assumption.
    pub fn transitive_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tags.iter().map(|(k, _)| *k)
    }
}
