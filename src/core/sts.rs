//! Security Token Service calls.
//!
//! Covers the three STS operations the federation needs:
//! - `AssumeRoleWithWebIdentity`: identity token for the first credential set
//! - `AssumeRole`: tagged second hop, called as the first credential set
//! - `GetCallerIdentity`: who a credential set authenticates as
//!
//! [`AwsSts`] implements [`SecurityTokenService`] with `aws-sdk-sts`.

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_sts::config::Credentials;
use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sts::types::Tag;
use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::constants::PROVIDER_NAME;
use crate::core::domain::{CredentialSet, IdentityToken, PrincipalIdentity, RoleArn, SessionTags};
use crate::error::{ExchangeError, Result};

/// First hop: trade an identity token for credentials.
#[derive(Debug)]
pub struct WebIdentityRequest {
    pub role: RoleArn,
    pub session_name: String,
    pub token: IdentityToken,
    pub duration_secs: i32,
}

/// Second hop: assume a role with provenance tags.
#[derive(Debug)]
pub struct TaggedRoleRequest {
    pub role: RoleArn,
    pub session_name: String,
    pub tags: SessionTags,
    pub duration_secs: i32,
}

/// STS operations used by the federation.
///
/// Each method makes exactly one call; errors are returned as-is.
#[async_trait]
pub trait SecurityTokenService: Send + Sync {
    /// Exchange an identity token for a credential set. Consumes the token.
    async fn assume_role_with_web_identity(
        &self,
        request: WebIdentityRequest,
    ) -> Result<CredentialSet>;

    /// Assume a role as `caller`, attaching session tags.
    async fn assume_role(
        &self,
        caller: &CredentialSet,
        request: &TaggedRoleRequest,
    ) -> Result<CredentialSet>;

    /// Resolve the principal `credentials` authenticate as.
    async fn get_caller_identity(&self, credentials: &CredentialSet) -> Result<PrincipalIdentity>;
}

/// Load the shared SDK configuration.
///
/// Retries are disabled: every call is a single attempt. With `ambient` unset
/// no credentials are resolved from the environment; calls that need
/// credentials get them explicitly.
pub async fn load_sdk_config(region: &str, endpoint_url: Option<&str>, ambient: bool) -> SdkConfig {
    debug!(region, endpoint_url, ambient, "loading AWS config");

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .retry_config(RetryConfig::disabled());
    if let Some(url) = endpoint_url {
        loader = loader.endpoint_url(url);
    }
    if !ambient {
        loader = loader.no_credentials();
    }
    loader.load().await
}

/// Static SDK credentials for a credential set.
pub(crate) fn sdk_credentials(credentials: &CredentialSet) -> Credentials {
    Credentials::new(
        credentials.access_key_id(),
        credentials.secret_access_key(),
        Some(credentials.session_token().to_string()),
        None,
        PROVIDER_NAME,
    )
}

/// Turn an SDK error into an `ExchangeError`, keeping the service message.
///
/// Service errors carry a message from AWS; transport errors do not, so the
/// full error context is used instead.
pub(crate) fn sdk_failure<E, R>(operation: &'static str, err: SdkError<E, R>) -> ExchangeError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    debug!(operation, code = err.code(), "AWS call failed");
    ExchangeError::Service { operation, message }
}

/// STS backed by `aws-sdk-sts`.
pub struct AwsSts {
    config: SdkConfig,
    client: aws_sdk_sts::Client,
}

impl AwsSts {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            config: config.clone(),
            client: aws_sdk_sts::Client::new(config),
        }
    }

    /// Client that signs requests with `credentials`.
    fn client_as(&self, credentials: &CredentialSet) -> aws_sdk_sts::Client {
        let conf = aws_sdk_sts::config::Builder::from(&self.config)
            .credentials_provider(sdk_credentials(credentials))
            .build();
        aws_sdk_sts::Client::from_conf(conf)
    }

    /// Identity of whatever credentials the SDK config resolved itself.
    pub async fn ambient_identity(&self) -> Result<PrincipalIdentity> {
        caller_identity(&self.client).await
    }
}

#[async_trait]
impl SecurityTokenService for AwsSts {
    async fn assume_role_with_web_identity(
        &self,
        request: WebIdentityRequest,
    ) -> Result<CredentialSet> {
        const OPERATION: &str = "AssumeRoleWithWebIdentity";
        debug!(role_arn = %request.role, session = %request.session_name, "assuming role with web identity");

        let output = self
            .client
            .assume_role_with_web_identity()
            .role_arn(request.role.as_str())
            .role_session_name(&request.session_name)
            .web_identity_token(request.token.expose())
            .duration_seconds(request.duration_secs)
            .send()
            .await
            .map_err(|e| sdk_failure(OPERATION, e))?;

        let credentials = output
            .credentials()
            .ok_or(ExchangeError::MissingCredentials {
                operation: OPERATION,
            })?;
        Ok(credential_set(credentials))
    }

    async fn assume_role(
        &self,
        caller: &CredentialSet,
        request: &TaggedRoleRequest,
    ) -> Result<CredentialSet> {
        const OPERATION: &str = "AssumeRole";
        debug!(role_arn = %request.role, session = %request.session_name, "assuming role with session tags");

        let mut call = self
            .client_as(caller)
            .assume_role()
            .role_arn(request.role.as_str())
            .role_session_name(&request.session_name)
            .duration_seconds(request.duration_secs);

        for (key, value) in request.tags.pairs() {
            let tag = Tag::builder()
                .key(key)
                .value(value)
                .build()
                .map_err(|e| ExchangeError::InvalidRequest {
                    operation: OPERATION,
                    reason: e.to_string(),
                })?;
            call = call.tags(tag);
        }
        for key in request.tags.transitive_keys() {
            call = call.transitive_tag_keys(key);
        }

        let output = call.send().await.map_err(|e| sdk_failure(OPERATION, e))?;
        let credentials = output
            .credentials()
            .ok_or(ExchangeError::MissingCredentials {
                operation: OPERATION,
            })?;
        Ok(credential_set(credentials))
    }

    async fn get_caller_identity(&self, credentials: &CredentialSet) -> Result<PrincipalIdentity> {
        caller_identity(&self.client_as(credentials)).await
    }
}

async fn caller_identity(client: &aws_sdk_sts::Client) -> Result<PrincipalIdentity> {
    let output = client
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| sdk_failure("GetCallerIdentity", e))?;

    trace!(account = output.account(), "caller identity resolved");
    Ok(PrincipalIdentity::new(
        output.user_id().unwrap_or_default(),
        output.arn().map(str::to_string),
        output.account().map(str::to_string),
    ))
}

fn credential_set(credentials: &aws_sdk_sts::types::Credentials) -> CredentialSet {
    let expiration = credentials.expiration();
    let expires_at = DateTime::<Utc>::from_timestamp(expiration.secs(), expiration.subsec_nanos());
    if let Some(at) = expires_at {
        debug!(expires_at = %at.to_rfc3339(), "credentials issued");
    }

    CredentialSet::new(
        credentials.access_key_id(),
        credentials.secret_access_key(),
        credentials.session_token(),
    )
    .with_expiration(expires_at)
}
