//! Command-line interface.

pub mod completions;
pub mod output;
pub mod run;
pub mod validate;
pub mod whoami;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::Mode;

/// Roleshift - two-hop OIDC role federation for GitHub Actions.
#[derive(Parser)]
#[command(
    name = "roleshift",
    about = "Exchange a workflow identity token for tagged AWS role credentials",
    version
)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Assume the broker role, then the requested role, and export credentials
    Run(Box<RunArgs>),

    /// Check a role ARN without calling AWS
    Validate {
        /// Role ARN to check
        role_arn: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the principal of the ambient AWS credentials
    Whoami {
        /// AWS region
        #[arg(long, env = "REGION")]
        region: Option<String>,

        /// Override the AWS endpoint (e.g. LocalStack)
        #[arg(long, env = "ROLESHIFT_ENDPOINT_URL")]
        endpoint_url: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments of `roleshift run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Role to assume in the second hop
    #[arg(long, env = "INPUT_ROLE-ARN")]
    pub role_arn: Option<String>,

    /// Config file (defaults to .roleshift.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Token and role strategies
    #[arg(long, value_enum, env = "ROLESHIFT_MODE", default_value_t = Mode::Production)]
    pub mode: Mode,

    /// AWS region
    #[arg(long, env = "REGION")]
    pub region: Option<String>,

    /// Role trusted by the OIDC provider (first hop)
    #[arg(long, env = "ROLESHIFT_BROKER_ROLE_ARN")]
    pub broker_role_arn: Option<String>,

    /// Bucket listed to prove the final credentials work
    #[arg(long, env = "ROLESHIFT_PROBE_BUCKET")]
    pub probe_bucket: Option<String>,

    /// Override the AWS endpoint (e.g. LocalStack)
    #[arg(long, env = "ROLESHIFT_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Workflow run id, used in the session name
    #[arg(long, env = "GITHUB_RUN_ID")]
    pub run_id: Option<String>,

    /// Triggering event, attached as the `event` tag
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event: Option<String>,

    /// Workflow ref, attached as the `ref` tag
    #[arg(long, env = "GITHUB_WORKFLOW_REF")]
    pub workflow_ref: Option<String>,

    /// Source repository, attached as the `repo` tag
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Fail the step when the role ARN is empty or malformed
    #[arg(long)]
    pub fail_on_invalid_role: bool,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Run(args) => run::execute(*args),
        Validate { role_arn, json } => validate::execute(&role_arn, json),
        Whoami {
            region,
            endpoint_url,
            json,
        } => whoami::execute(region, endpoint_url, json),
        Completions { shell } => completions::execute(shell),
    }
}
