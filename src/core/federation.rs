//! Two-hop role federation.
//!
//! Drives the exchange from a validated role to a probed second credential
//! set:
//!
//! ```text
//! Validated → Hop1Exchanged → Hop1Published → Hop1Verified
//!           → Hop2Exchanged → Hop2Published → Hop2Verified → Probed → Done
//! ```
//!
//! Every step is awaited before the next starts. The first error ends the
//! run and is returned unchanged; nothing already published is rolled back.

use tracing::{debug, warn};

use crate::core::config::Settings;
use crate::core::constants::AUDIENCE;
use crate::core::domain::{InvocationContext, PrincipalIdentity, RoleArn, SessionTags};
use crate::core::probe::ObjectStore;
use crate::core::publish::CredentialPublisher;
use crate::core::resolver::RoleResolver;
use crate::core::sts::{SecurityTokenService, TaggedRoleRequest, WebIdentityRequest};
use crate::core::token::TokenProvider;
use crate::error::Result;

/// States of a federation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validated,
    Hop1Exchanged,
    Hop1Published,
    Hop1Verified,
    Hop2Exchanged,
    Hop2Published,
    Hop2Verified,
    Probed,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Validated => "validated",
            Self::Hop1Exchanged => "hop1-exchanged",
            Self::Hop1Published => "hop1-published",
            Self::Hop1Verified => "hop1-verified",
            Self::Hop2Exchanged => "hop2-exchanged",
            Self::Hop2Published => "hop2-published",
            Self::Hop2Verified => "hop2-verified",
            Self::Probed => "probed",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Which exchange a principal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// Web-identity exchange against the broker role
    Broker,
    /// Tagged assumption of the requested role
    Target,
}

impl std::fmt::Display for Hop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Broker => f.write_str("broker"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Receives the human-readable results as the run progresses.
pub trait Reporter {
    /// A hop's credentials were verified.
    fn principal(&self, hop: Hop, identity: &PrincipalIdentity);

    /// The probe listed `keys` in `bucket`.
    fn listing(&self, bucket: &str, keys: &[String]);
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub target_role: RoleArn,
    pub broker_principal: PrincipalIdentity,
    pub target_principal: PrincipalIdentity,
    pub keys: Vec<String>,
}

/// Collaborators the federation drives.
pub struct Collaborators {
    pub tokens: Box<dyn TokenProvider>,
    pub roles: Box<dyn RoleResolver>,
    pub sts: Box<dyn SecurityTokenService>,
    pub store: Box<dyn ObjectStore>,
    pub publisher: Box<dyn CredentialPublisher>,
}

/// Orchestrates the two-hop exchange.
pub struct Federation {
    settings: Settings,
    context: InvocationContext,
    parts: Collaborators,
}

impl Federation {
    pub fn new(settings: Settings, context: InvocationContext, parts: Collaborators) -> Self {
        Self {
            settings,
            context,
            parts,
        }
    }

    /// Run the federation for an already validated role.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any stage, unchanged.
    pub async fn run(&self, requested: RoleArn, reporter: &dyn Reporter) -> Result<Report> {
        let mut stage = Stage::Validated;
        debug!(stage = %stage, role_arn = %requested, "federation started");

        match self.execute(requested, reporter, &mut stage).await {
            Ok(report) => {
                advance(&mut stage, Stage::Done);
                Ok(report)
            }
            Err(e) => {
                warn!(stage = %stage, error = %e, "federation failed");
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        requested: RoleArn,
        reporter: &dyn Reporter,
        stage: &mut Stage,
    ) -> Result<Report> {
        let parts = &self.parts;

        // Context is checked up front so a missing value fails before any call.
        let target_session = self.context.session_name()?;
        let tags = SessionTags::from_context(&self.context)?;

        let token = parts.tokens.fetch(AUDIENCE).await?;
        debug!(provider = parts.tokens.name(), "identity token acquired");

        let broker = parts
            .sts
            .assume_role_with_web_identity(WebIdentityRequest {
                role: self.settings.broker_role.clone(),
                session_name: self.settings.broker_session_name.clone(),
                token,
                duration_secs: self.settings.broker_duration_secs,
            })
            .await?;
        advance(stage, Stage::Hop1Exchanged);

        parts.publisher.publish(&broker)?;
        advance(stage, Stage::Hop1Published);

        let broker_principal = parts.sts.get_caller_identity(&broker).await?;
        reporter.principal(Hop::Broker, &broker_principal);
        advance(stage, Stage::Hop1Verified);

        let target_role = parts.roles.resolve(&requested)?;
        let request = TaggedRoleRequest {
            role: target_role.clone(),
            session_name: target_session,
            tags,
            duration_secs: self.settings.target_duration_secs,
        };
        let target = parts.sts.assume_role(&broker, &request).await?;
        advance(stage, Stage::Hop2Exchanged);

        parts.publisher.publish(&target)?;
        advance(stage, Stage::Hop2Published);

        let target_principal = parts.sts.get_caller_identity(&target).await?;
        reporter.principal(Hop::Target, &target_principal);
        advance(stage, Stage::Hop2Verified);

        let bucket = &self.settings.probe_bucket;
        let keys = parts.store.list_keys(&target, bucket).await?;
        reporter.listing(bucket, &keys);
        advance(stage, Stage::Probed);

        Ok(Report {
            target_role,
            broker_principal,
            target_principal,
            keys,
        })
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = %stage, to = %next, "stage transition");
    *stage = next;
}
