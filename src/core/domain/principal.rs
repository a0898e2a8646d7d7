//! Caller identity returned by the identity check.

/// The principal a credential set authenticates as.
///
/// Only used for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalIdentity {
    user_id: String,
    arn: Option<String>,
    account: Option<String>,
}

impl PrincipalIdentity {
    pub fn new(user_id: impl Into<String>, arn: Option<String>, account: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            arn,
            account,
        }
    }

    /// Unique id of the caller (`AROA...:session` for assumed roles).
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn arn(&self) -> Option<&str> {
        self.arn.as_deref()
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }
}

impl std::fmt::Display for PrincipalIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.user_id)
    }
}
