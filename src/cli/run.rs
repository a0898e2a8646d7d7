//! Run command.
//!
//! Validates the requested role, wires the collaborators for the selected
//! mode and drives the two-hop federation.

use std::cell::RefCell;
use std::io::{Stdout, Write};

use tracing::debug;

use crate::cli::{output, RunArgs};
use crate::core::config::{Config, Overrides};
use crate::core::domain::{InvocationContext, PrincipalIdentity, RoleArn};
use crate::core::federation::{Collaborators, Federation, Hop, Reporter};
use crate::core::probe::{self, S3Store};
use crate::core::publish::ActionsEnvPublisher;
use crate::core::sts::{self, AwsSts};
use crate::core::{resolver, token, workflow};
use crate::error::{ConfigError, Result};

/// Prints progress lines as the federation reports them.
///
/// Writes to stdout in a run; tests hand it a buffer.
pub struct ConsoleReporter<W: Write> {
    out: RefCell<W>,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, msg: &str) {
        if let Err(e) = writeln!(self.out.borrow_mut(), "{}", msg) {
            debug!(error = %e, "failed to write report line");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn principal(&self, hop: Hop, identity: &PrincipalIdentity) {
        debug!(hop = %hop, arn = identity.arn(), "principal verified");
        self.line(identity.user_id());
    }

    fn listing(&self, bucket: &str, keys: &[String]) {
        if keys.is_empty() {
            self.line(&output::dim(&format!("bucket {} is empty", bucket)));
        } else {
            self.line(&probe::format_listing(keys));
        }
    }
}

/// Run the federation.
///
/// An empty or malformed role is reported and ends the run without failing
/// it, unless `--fail-on-invalid-role` is set.
pub fn execute(args: RunArgs) -> Result<()> {
    let input = args.role_arn.as_deref().unwrap_or_default().trim().to_string();
    output::info(&format!("Target Role Arn: {}", workflow::escape(&input)));

    let requested = match RoleArn::parse(&input) {
        Ok(role) => role,
        Err(e) => {
            output::error(&e.to_string());
            if args.fail_on_invalid_role {
                return Err(e.into());
            }
            debug!("role rejected, stopping without failure");
            return Ok(());
        }
    };

    let mut config = Config::load(args.config.as_deref())?;
    config.apply(Overrides {
        region: args.region.clone(),
        broker_role_arn: args.broker_role_arn.clone(),
        probe_bucket: args.probe_bucket.clone(),
    });
    let settings = config.settings()?;

    let context = InvocationContext {
        run_id: args.run_id,
        event: args.event,
        workflow_ref: args.workflow_ref,
        repository: args.repository,
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ConfigError::Runtime)?;

    rt.block_on(async {
        let endpoint = args.endpoint_url.as_deref().filter(|u| !u.is_empty());
        let sdk = sts::load_sdk_config(&settings.region, endpoint, false).await;

        let parts = Collaborators {
            tokens: token::select(args.mode),
            roles: resolver::select(args.mode),
            sts: Box::new(AwsSts::new(&sdk)),
            store: Box::new(S3Store::new(&sdk, endpoint.is_some())),
            publisher: Box::new(ActionsEnvPublisher::from_env()),
        };

        Federation::new(settings, context, parts)
            .run(requested, &ConsoleReporter::stdout())
            .await
    })?;

    Ok(())
}
