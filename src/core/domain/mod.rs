//! Domain types.

mod context;
mod credentials;
mod principal;
mod role;
mod tags;
mod token;

pub use context::InvocationContext;
pub use credentials::CredentialSet;
pub use principal::PrincipalIdentity;
pub use role::RoleArn;
pub use tags::SessionTags;
pub use token::IdentityToken;
