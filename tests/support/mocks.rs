//! Mock collaborators for in-process federation tests.
//!
//! Every mock writes to a shared [`Journal`] so tests can assert on the
//! order of calls across collaborators.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use roleshift::core::domain::{CredentialSet, IdentityToken, InvocationContext, PrincipalIdentity};
use roleshift::core::federation::{Collaborators, Federation, Hop, Reporter};
use roleshift::core::probe::{self, ObjectStore};
use roleshift::core::publish::CredentialPublisher;
use roleshift::core::resolver::{RequestedRole, RoleResolver};
use roleshift::core::sts::{SecurityTokenService, TaggedRoleRequest, WebIdentityRequest};
use roleshift::core::token::TokenProvider;
use roleshift::error::{ExchangeError, Result, TokenError};

use super::fixtures;

pub const BROKER_KEY: &str = "ASIA-BROKER";
pub const TARGET_KEY: &str = "ASIA-TARGET";
pub const FAILURE: &str = "STS failure";

/// Ordered record of calls.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Index of the first entry starting with `prefix`.
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.entries().iter().position(|e| e.starts_with(prefix))
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.position(prefix).is_some()
    }
}

/// Published environment, later writes win.
pub type Env = Arc<Mutex<BTreeMap<String, String>>>;

/// Where a mock should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Token,
    WebIdentity,
    BrokerIdentity,
    AssumeRole,
    TargetIdentity,
    Probe,
}

fn failure(operation: &'static str) -> roleshift::error::Error {
    ExchangeError::Service {
        operation,
        message: FAILURE.to_string(),
    }
    .into()
}

pub fn broker_credentials() -> CredentialSet {
    CredentialSet::new(BROKER_KEY, "broker-secret", "broker-token")
}

pub fn target_credentials() -> CredentialSet {
    CredentialSet::new(TARGET_KEY, "target-secret", "target-token")
}

pub struct MockTokens {
    journal: Journal,
    fail: bool,
}

#[async_trait]
impl TokenProvider for MockTokens {
    async fn fetch(&self, audience: &str) -> Result<IdentityToken> {
        self.journal.record(format!("token:{}", audience));
        if self.fail {
            return Err(TokenError::EmptyResponse.into());
        }
        Ok(IdentityToken::new("mock-id-token"))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

pub struct MockSts {
    journal: Journal,
    fail: Option<FailAt>,
}

#[async_trait]
impl SecurityTokenService for MockSts {
    async fn assume_role_with_web_identity(
        &self,
        request: WebIdentityRequest,
    ) -> Result<CredentialSet> {
        self.journal.record(format!(
            "web-identity:{}:{}:{}:{}",
            request.role,
            request.session_name,
            request.duration_secs,
            request.token.expose()
        ));
        if self.fail == Some(FailAt::WebIdentity) {
            return Err(failure("AssumeRoleWithWebIdentity"));
        }
        Ok(broker_credentials())
    }

    async fn assume_role(
        &self,
        caller: &CredentialSet,
        request: &TaggedRoleRequest,
    ) -> Result<CredentialSet> {
        let tags: Vec<String> = request
            .tags
            .pairs()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        let transitive: Vec<&str> = request.tags.transitive_keys().collect();
        self.journal.record(format!(
            "assume-role:{}:{}:{}:{}:[{}]:[{}]",
            caller.access_key_id(),
            request.role,
            request.session_name,
            request.duration_secs,
            tags.join(","),
            transitive.join(",")
        ));
        if self.fail == Some(FailAt::AssumeRole) {
            return Err(failure("AssumeRole"));
        }
        Ok(target_credentials())
    }

    async fn get_caller_identity(&self, credentials: &CredentialSet) -> Result<PrincipalIdentity> {
        let key = credentials.access_key_id();
        self.journal.record(format!("verify:{}", key));
        let (fail_at, user_id) = if key == BROKER_KEY {
            (FailAt::BrokerIdentity, "AROABROKER:FederatedIdentityRole")
        } else {
            (FailAt::TargetIdentity, "AROATARGET:GHA-1234")
        };
        if self.fail == Some(fail_at) {
            return Err(failure("GetCallerIdentity"));
        }
        Ok(PrincipalIdentity::new(user_id, None, None))
    }
}

pub struct MockStore {
    journal: Journal,
    keys: Vec<String>,
    fail: bool,
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn list_keys(&self, credentials: &CredentialSet, bucket: &str) -> Result<Vec<String>> {
        self.journal
            .record(format!("list:{}:{}", credentials.access_key_id(), bucket));
        if self.fail {
            return Err(failure("ListObjects"));
        }
        Ok(self.keys.clone())
    }
}

pub struct MemoryPublisher {
    journal: Journal,
    env: Env,
}

impl CredentialPublisher for MemoryPublisher {
    fn publish(&self, credentials: &CredentialSet) -> Result<()> {
        let mut env = self.env.lock().unwrap();
        for (name, value) in credentials.entries() {
            env.insert(name.to_string(), value.to_string());
        }
        self.journal
            .record(format!("publish:{}", credentials.access_key_id()));
        Ok(())
    }
}

/// Records reporter callbacks into the journal.
pub struct RecordingReporter {
    journal: Journal,
}

impl RecordingReporter {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl Reporter for RecordingReporter {
    fn principal(&self, hop: Hop, identity: &PrincipalIdentity) {
        self.journal
            .record(format!("principal:{}:{}", hop, identity.user_id()));
    }

    fn listing(&self, bucket: &str, keys: &[String]) {
        self.journal.record(format!(
            "listing:{}:{}",
            bucket,
            probe::format_listing(keys)
        ));
    }
}

/// Builds a federation wired to mocks.
pub struct Harness {
    pub journal: Journal,
    pub env: Env,
    fail: Option<FailAt>,
    keys: Vec<String>,
    roles: Box<dyn RoleResolver>,
    context: InvocationContext,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            journal: Journal::default(),
            env: Env::default(),
            fail: None,
            keys: vec!["file1.txt".to_string(), "file2.txt".to_string()],
            roles: Box::new(RequestedRole),
            context: fixtures::context(),
        }
    }

    pub fn failing_at(mut self, fail: FailAt) -> Self {
        self.fail = Some(fail);
        self
    }

    pub fn with_keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_roles(mut self, roles: Box<dyn RoleResolver>) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_context(mut self, context: InvocationContext) -> Self {
        self.context = context;
        self
    }

    /// Federation plus the reporter to run it with.
    pub fn build(self) -> Built {
        let parts = Collaborators {
            tokens: Box::new(MockTokens {
                journal: self.journal.clone(),
                fail: self.fail == Some(FailAt::Token),
            }),
            roles: self.roles,
            sts: Box::new(MockSts {
                journal: self.journal.clone(),
                fail: self.fail,
            }),
            store: Box::new(MockStore {
                journal: self.journal.clone(),
                keys: self.keys,
                fail: self.fail == Some(FailAt::Probe),
            }),
            publisher: Box::new(MemoryPublisher {
                journal: self.journal.clone(),
                env: self.env.clone(),
            }),
        };
        Built {
            federation: Federation::new(fixtures::settings(), self.context, parts),
            reporter: RecordingReporter::new(&self.journal),
            journal: self.journal,
            env: self.env,
        }
    }
}

/// A wired federation and handles onto what its mocks recorded.
pub struct Built {
    pub federation: Federation,
    pub reporter: RecordingReporter,
    pub journal: Journal,
    pub env: Env,
}

impl Built {
    /// Snapshot of the published environment.
    pub fn env(&self) -> BTreeMap<String, String> {
        self.env.lock().unwrap().clone()
    }
}
