//! Token sources.
//!
//! A [`TokenProvider`] produces the identity token for the web-identity
//! exchange. The provider is picked once, from the [`Mode`], by [`select`];
//! nothing else in the flow branches on the mode.
//!
//! - `GithubOidcTokenProvider`: asks the Actions runtime for a fresh OIDC token
//! - `StaticTokenProvider`: returns a pre-provisioned token (development only)

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::core::config::Mode;
use crate::core::constants::{ID_TOKEN_TOKEN_VAR, ID_TOKEN_URL_VAR, STATIC_TOKEN_VAR};
use crate::core::domain::IdentityToken;
use crate::error::{Result, TokenError};

/// Source of workload identity tokens.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a token scoped to `audience`. Single attempt, no retry.
    async fn fetch(&self, audience: &str) -> Result<IdentityToken>;

    /// Provider name for logs.
    fn name(&self) -> &'static str;
}

/// Select the token provider for a mode.
pub fn select(mode: Mode) -> Box<dyn TokenProvider> {
    match mode {
        Mode::Production => Box::new(GithubOidcTokenProvider::from_env()),
        Mode::Development => {
            warn!(
                source = STATIC_TOKEN_VAR,
                "development mode: identity token is read from the environment"
            );
            Box::new(StaticTokenProvider::from_env())
        }
    }
}

/// Requests OIDC tokens from the GitHub Actions runtime.
///
/// Needs the job to have `id-token: write` permission, which makes the runner
/// set `ACTIONS_ID_TOKEN_REQUEST_URL` and `ACTIONS_ID_TOKEN_REQUEST_TOKEN`.
pub struct GithubOidcTokenProvider {
    request_url: Option<String>,
    request_token: Option<Zeroizing<String>>,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    value: Option<String>,
}

impl GithubOidcTokenProvider {
    pub fn new(request_url: Option<String>, request_token: Option<String>) -> Self {
        Self {
            request_url,
            request_token: request_token.map(Zeroizing::new),
            http: reqwest::Client::new(),
        }
    }

    /// Read the request url and bearer token from the runner environment.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(ID_TOKEN_URL_VAR).ok(),
            std::env::var(ID_TOKEN_TOKEN_VAR).ok(),
        )
    }

    fn url_for(&self, audience: &str) -> Result<reqwest::Url> {
        let raw = self
            .request_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(TokenError::MissingRequestEnv(ID_TOKEN_URL_VAR))?;
        let mut url = reqwest::Url::parse(raw).map_err(|e| TokenError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("audience", audience);
        Ok(url)
    }
}

#[async_trait]
impl TokenProvider for GithubOidcTokenProvider {
    async fn fetch(&self, audience: &str) -> Result<IdentityToken> {
        let url = self.url_for(audience)?;
        let bearer = self
            .request_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(TokenError::MissingRequestEnv(ID_TOKEN_TOKEN_VAR))?;

        debug!(audience, "requesting identity token");

        let response = self
            .http
            .get(url)
            .bearer_auth(bearer.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, "actions/oidc-client")
            .send()
            .await
            .map_err(|e| TokenError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenError::Status {
                status: status.as_u16(),
            }
            .into());
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::Request(e.to_string()))?;
        let value = body
            .value
            .filter(|v| !v.is_empty())
            .ok_or(TokenError::EmptyResponse)?;

        trace!(token_len = value.len(), "identity token received");
        Ok(IdentityToken::new(value))
    }

    fn name(&self) -> &'static str {
        "github-oidc"
    }
}

/// Returns a token provisioned ahead of time, for local runs.
pub struct StaticTokenProvider {
    token: Option<Zeroizing<String>>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.map(Zeroizing::new),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(STATIC_TOKEN_VAR).ok())
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn fetch(&self, _audience: &str) -> Result<IdentityToken> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(TokenError::MissingStaticToken(STATIC_TOKEN_VAR))?;
        Ok(IdentityToken::new(token.as_str()))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
