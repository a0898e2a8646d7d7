//! Constants used throughout roleshift.
//!
//! Centralizes magic strings and configuration values.

/// Audience the identity token is scoped to (the STS service name).
pub const AUDIENCE: &str = "sts.amazonaws.com";

/// Configuration file name (.roleshift.toml).
pub const CONFIG_FILE: &str = ".roleshift.toml";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Session name for the web-identity exchange.
pub const BROKER_SESSION_NAME: &str = "FederatedIdentityRole";

/// Credential lifetime for the first hop (one hour).
pub const BROKER_DURATION_SECS: i32 = 3600;

/// Credential lifetime for the second hop (fifteen minutes).
pub const TARGET_DURATION_SECS: i32 = 900;

/// Bounds STS accepts for `DurationSeconds`.
pub const MIN_DURATION_SECS: i32 = 900;
pub const MAX_DURATION_SECS: i32 = 43200;

/// Prefix of the second-hop session name, followed by the run id.
pub const TARGET_SESSION_PREFIX: &str = "GHA-";

/// Bucket listed by the smoke-test probe.
pub const PROBE_BUCKET: &str = "gha-oid-test-bucket";

/// Provider name attached to credentials handed to the AWS SDK.
pub const PROVIDER_NAME: &str = "roleshift";

/// Partitions accepted in role ARNs.
pub const PARTITIONS: &[&str] = &["aws", "aws-cn", "aws-us-gov"];

/// Environment entries the credential publisher writes.
pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";

/// GitHub Actions runtime variables.
pub const GITHUB_ACTIONS_VAR: &str = "GITHUB_ACTIONS";
pub const GITHUB_ENV_VAR: &str = "GITHUB_ENV";
pub const ID_TOKEN_URL_VAR: &str = "ACTIONS_ID_TOKEN_REQUEST_URL";
pub const ID_TOKEN_TOKEN_VAR: &str = "ACTIONS_ID_TOKEN_REQUEST_TOKEN";

/// Development-mode substitutes.
pub const STATIC_TOKEN_VAR: &str = "ACCESS_TOKEN";
pub const TARGET_ROLE_OVERRIDE_VAR: &str = "TARGET_ROLE_ARN";

/// Session tag keys, in the order they are attached.
pub const TAG_EVENT: &str = "event";
pub const TAG_REF: &str = "ref";
pub const TAG_REPO: &str = "repo";
