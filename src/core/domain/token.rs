//! Identity token type.

use zeroize::Zeroizing;

/// A short-lived OIDC token proving workload identity.
///
/// Not `Clone`: a token is produced once and handed, by value, to the
/// web-identity exchange.
pub struct IdentityToken(Zeroizing<String>);

impl IdentityToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Raw bearer value, for the exchange request only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for IdentityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IdentityToken(<redacted, {} bytes>)", self.0.len())
    }
}
