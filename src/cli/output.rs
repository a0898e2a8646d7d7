//! Shared CLI output helpers.
//!
//! Inside a GitHub Actions job, errors are emitted as workflow
//! commands so they show up as annotations. Elsewhere they are styled for a
//! terminal.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Cyan: hints
//! - Dimmed: secondary info

use console::style;

use crate::core::workflow;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a plain informational line.
pub fn info(msg: &str) {
    println!("{}", msg);
}

/// Print machine-readable output, unstyled.
pub fn data(msg: &str) {
    println!("{}", msg);
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ role arn is valid`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message.
///
/// Actions: `::error::msg` on stdout. Terminal: `✗ msg` on stderr.
pub fn error(msg: &str) {
    if workflow::is_actions() {
        println!("{}", workflow::command("error", msg));
    } else if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a hint message (cyan).
///
/// Example: `→ set broker.role_arn in .roleshift.toml`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  account:  123456789012`
pub fn kv(label: &str, value: impl std::fmt::Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Dimmed text, plain when colors are disabled.
pub fn dim(msg: &str) -> String {
    if colors_enabled() {
        style(msg).dim().to_string()
    } else {
        msg.to_string()
    }
}
