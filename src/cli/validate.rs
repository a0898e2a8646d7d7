//! Validate command.

use crate::cli::output;
use crate::core::domain::RoleArn;
use crate::error::Result;

/// Check a role ARN without calling AWS.
pub fn execute(role_arn: &str, json: bool) -> Result<()> {
    let role = RoleArn::parse(role_arn.trim())?;

    if json {
        let result = serde_json::json!({
            "role_arn": role.as_str(),
            "account": role.account(),
            "valid": true
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else {
        output::success(&format!("valid role arn: {}", role));
        output::kv("account", role.account());
    }
    Ok(())
}
