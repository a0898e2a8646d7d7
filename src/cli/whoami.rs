//! Whoami command - print the principal of the ambient credentials.
//!
//! Useful in a later step to confirm which role the exported credentials
//! belong to.

use crate::cli::output;
use crate::core::constants::DEFAULT_REGION;
use crate::core::sts::{self, AwsSts};
use crate::error::{ConfigError, Result};

/// Print the caller identity.
pub fn execute(region: Option<String>, endpoint_url: Option<String>, json: bool) -> Result<()> {
    let region = region
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ConfigError::Runtime)?;

    let identity = rt.block_on(async {
        let config = sts::load_sdk_config(&region, endpoint_url.as_deref(), true).await;
        AwsSts::new(&config).ambient_identity().await
    })?;

    if json {
        let result = serde_json::json!({
            "user_id": identity.user_id(),
            "arn": identity.arn(),
            "account": identity.account()
        });
        output::data(&serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    output::info(identity.user_id());
    if let Some(arn) = identity.arn() {
        output::kv("arn", arn);
    }
    if let Some(account) = identity.account() {
        output::kv("account", account);
    }
    Ok(())
}
