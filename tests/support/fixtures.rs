//! Shared test values.

use roleshift::core::config::Settings;
use roleshift::core::domain::{InvocationContext, RoleArn};

pub const TARGET_ROLE: &str = "arn:aws:iam::123456789012:role/MyTestRole";
pub const BROKER_ROLE: &str = "arn:aws:iam::038462754764:role/GitHubActionsOIDCRole";

pub const RUN_ID: &str = "1234";
pub const EVENT: &str = "push";
pub const WORKFLOW_REF: &str = "my-org/my-repo/.github/workflows/test.yml@refs/heads/main";
pub const REPOSITORY: &str = "my-org/my-repo";

pub fn target_role() -> RoleArn {
    RoleArn::parse(TARGET_ROLE).expect("fixture role is valid")
}

pub fn settings() -> Settings {
    Settings {
        region: "eu-west-1".to_string(),
        broker_role: RoleArn::parse(BROKER_ROLE).expect("fixture role is valid"),
        broker_session_name: "FederatedIdentityRole".to_string(),
        broker_duration_secs: 3600,
        target_duration_secs: 900,
        probe_bucket: "gha-oid-test-bucket".to_string(),
    }
}

pub fn context() -> InvocationContext {
    InvocationContext {
        run_id: Some(RUN_ID.to_string()),
        event: Some(EVENT.to_string()),
        workflow_ref: Some(WORKFLOW_REF.to_string()),
        repository: Some(REPOSITORY.to_string()),
    }
}
