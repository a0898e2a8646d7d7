//! Input validation for roleshift operations.
//!
//! Validates role references before anything touches the network.

use crate::core::constants::PARTITIONS;
use crate::error::ValidationError;

/// Line terminators, never valid inside a role ARN.
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Validate an IAM role ARN.
///
/// The value must look like `arn:<partition>:iam::<12-digit account>:<resource>`:
/// - `partition` is one of `aws`, `aws-cn`, `aws-us-gov`
/// - the region segment is empty (IAM is global)
/// - the account is exactly twelve ASCII digits
/// - no line terminator appears anywhere in the value
///
/// # Errors
///
/// Returns `ValidationError::EmptyRole` for an empty value and
/// `ValidationError::MalformedRole` for anything else that does not match.
pub fn validate_role_arn(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyRole);
    }

    let malformed = || ValidationError::MalformedRole(value.to_string());
    if value.contains(&LINE_TERMINATORS[..]) {
        return Err(malformed());
    }

    let parts: Vec<&str> = value.splitn(6, ':').collect();
    if parts.len() != 6 {
        return Err(malformed());
    }

    let (prefix, partition, service, region, account) =
        (parts[0], parts[1], parts[2], parts[3], parts[4]);

    if prefix != "arn" || !PARTITIONS.contains(&partition) || service != "iam" {
        return Err(malformed());
    }
    if !region.is_empty() {
        return Err(malformed());
    }
    if account.len() != 12 || !account.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    Ok(())
}

/// Validate an STS role session name.
///
/// Session names are 2 to 64 characters from `[A-Za-z0-9+=,.@_-]`.
pub fn validate_session_name(name: &str) -> Result<(), String> {
    if !(2..=64).contains(&name.len()) {
        return Err(format!("must be 2-64 characters, got {}", name.len()));
    }
    if let Some(ch) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !"+=,.@_-".contains(*c))
    {
        return Err(format!("invalid character '{}'", ch));
    }
    Ok(())
}
