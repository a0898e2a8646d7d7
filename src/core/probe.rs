//! Smoke-test probe.
//!
//! Lists a bucket with the final credential set to prove the credentials
//! work end to end.

use async_trait::async_trait;
use aws_config::SdkConfig;
use tracing::debug;

use crate::core::domain::CredentialSet;
use crate::core::sts::{sdk_credentials, sdk_failure};
use crate::error::Result;

/// Object listing used as the probe.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Keys in `bucket`, listed as `credentials`. Single call.
    async fn list_keys(&self, credentials: &CredentialSet, bucket: &str) -> Result<Vec<String>>;
}

/// S3 backed by `aws-sdk-s3`.
pub struct S3Store {
    config: SdkConfig,
    path_style: bool,
}

impl S3Store {
    /// `path_style` is needed for custom endpoints such as LocalStack.
    pub fn new(config: &SdkConfig, path_style: bool) -> Self {
        Self {
            config: config.clone(),
            path_style,
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_keys(&self, credentials: &CredentialSet, bucket: &str) -> Result<Vec<String>> {
        debug!(bucket, "listing objects");

        let conf = aws_sdk_s3::config::Builder::from(&self.config)
            .credentials_provider(sdk_credentials(credentials))
            .force_path_style(self.path_style)
            .build();
        let client = aws_sdk_s3::Client::from_conf(conf);

        let output = client
            .list_objects()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| sdk_failure("ListObjects", e))?;

        let keys: Vec<String> = output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect();
        debug!(count = keys.len(), "objects listed");
        Ok(keys)
    }
}

/// Format keys as a bullet list, one ` * key` line each.
pub fn format_listing(keys: &[String]) -> String {
    keys.iter()
        .map(|key| format!(" * {}", key))
        .collect::<Vec<_>>()
        .join("\n")
}
