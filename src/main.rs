//! Roleshift - two-hop OIDC role federation for GitHub Actions.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use roleshift::cli::output;
use roleshift::cli::{execute, Cli};
use roleshift::error::{ConfigError, Error, TokenError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("ROLESHIFT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("roleshift=debug")
        } else {
            EnvFilter::new("roleshift=warn")
        }
    });

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("ROLESHIFT_LOG_FORMAT").is_ok_and(|f| f == "json") {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer).init();
    }

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingField {
                field: "broker.role_arn",
            }) => Some("set broker.role_arn in .roleshift.toml or ROLESHIFT_BROKER_ROLE_ARN"),
            Error::Token(TokenError::MissingRequestEnv(_)) => {
                Some("grant the job `id-token: write` permission")
            }
            Error::Config(ConfigError::MissingContext(_)) => {
                Some("pass the value with its flag when running outside GitHub Actions")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
