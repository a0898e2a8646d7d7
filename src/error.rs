//! Error types.
//!
//! Every concern has its own enum; [`Error`] wraps them transparently so the
//! message reported at the end of a run is the underlying message, unchanged.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for roleshift operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejections of a caller-supplied role reference.
///
/// These are soft stops: the run ends without being marked as failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Role Arn cannot be empty")]
    EmptyRole,

    #[error("Incorrect Role Arn format")]
    MalformedRole(String),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("missing required setting: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("missing invocation context: {0} is not set")]
    MissingContext(&'static str),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Identity token acquisition errors.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("unable to request an identity token: {0} is not set")]
    MissingRequestEnv(&'static str),

    #[error("development mode requires {0} to hold a static identity token")]
    MissingStaticToken(&'static str),

    #[error("invalid token request url: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Request(String),

    #[error("identity token request failed with status {status}")]
    Status { status: u16 },

    #[error("identity token response did not contain a value")]
    EmptyResponse,
}

/// Failures of the remote calls: both assume-role hops, the identity check
/// and the storage probe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The service (or transport) rejected the call. Displays the message as-is.
    #[error("{message}")]
    Service {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} response did not include credentials")]
    MissingCredentials { operation: &'static str },

    #[error("invalid {operation} request: {reason}")]
    InvalidRequest {
        operation: &'static str,
        reason: String,
    },
}

/// Credential publication errors.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("value for {0} contains the env file delimiter")]
    DelimiterCollision(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
