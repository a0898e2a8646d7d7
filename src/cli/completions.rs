//! Completions command.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::Result;

/// Print a completion script for `shell`.
pub fn execute(shell: Shell) -> Result<()> {
    render(shell, &mut std::io::stdout());
    Ok(())
}

/// Write the completion script, named after the binary, to `out`.
pub fn render(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}
