//! Role reference type.
//!
//! A `RoleArn` can only be obtained through validation, so holding one means
//! the value already has the `arn:<partition>:iam::<account>:<resource>` shape.

use crate::core::validation;
use crate::error::ValidationError;

/// A validated IAM role ARN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleArn(String);

impl RoleArn {
    /// Validate and wrap a role ARN.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyRole` or `ValidationError::MalformedRole`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        validation::validate_role_arn(value)?;
        Ok(Self(value.to_string()))
    }

    /// The ARN string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Twelve-digit account the role lives in.
    pub fn account(&self) -> &str {
        self.0.split(':').nth(4).unwrap_or_default()
    }
}

impl std::fmt::Display for RoleArn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
