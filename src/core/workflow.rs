//! GitHub Actions workflow commands.
//!
//! Workflow commands are lines on stdout of the form `::name::value` that the
//! runner interprets (annotations, secret masking).

use crate::core::constants::GITHUB_ACTIONS_VAR;

/// Whether we are running inside a GitHub Actions job.
pub fn is_actions() -> bool {
    std::env::var(GITHUB_ACTIONS_VAR).is_ok_and(|v| v == "true")
}

/// Format a workflow command line.
///
/// Escapes `%`, `\r` and `\n` in the value so it stays on a single line.
pub fn command(name: &str, value: &str) -> String {
    format!("::{}::{}", name, escape(value))
}

/// Escape a value so it cannot span lines of the job log.
pub fn escape(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_format() {
        assert_eq!(
            command("error", "Incorrect Role Arn format"),
            "::error::Incorrect Role Arn format"
        );
    }

    #[test]
    fn test_command_escapes_newlines() {
        assert_eq!(command("error", "a\nb%c\r"), "::error::a%0Ab%25c%0D");
    }

    #[test]
    fn test_escape_keeps_single_line() {
        assert_eq!(
            escape("role/X\n::add-mask::oops"),
            "role/X%0A::add-mask::oops"
        );
        assert_eq!(escape("plain"), "plain");
    }
}
