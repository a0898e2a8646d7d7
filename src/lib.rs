//! Roleshift - two-hop OIDC role federation for GitHub Actions.
//!
//! Exchanges a workflow's OIDC token for credentials of a broker role, uses
//! those to assume the requested role with provenance session tags, exports
//! each credential set for later steps and lists a bucket to prove the final
//! credentials work.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── run           # Two-hop federation
//! │   ├── validate      # Role ARN check
//! │   ├── whoami        # Ambient caller identity
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal / workflow-command output
//! └── core/             # Core library components
//!     ├── config        # .roleshift.toml management
//!     ├── domain/       # RoleArn, CredentialSet, SessionTags, ...
//!     ├── validation    # Role ARN validation
//!     ├── token         # Identity token providers
//!     ├── resolver      # Second-hop role selection
//!     ├── sts           # STS exchanges and identity check
//!     ├── probe         # S3 smoke test
//!     ├── publish       # Credential export
//!     ├── workflow      # GitHub Actions workflow commands
//!     └── federation    # Orchestration
//! ```

pub mod cli;
pub mod core;
pub mod error;
