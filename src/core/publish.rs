//! Credential publication.
//!
//! Exports a credential set for later workflow steps. All three entries go
//! out together or not at all; publishing again overwrites the previous set.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants::GITHUB_ENV_VAR;
use crate::core::domain::CredentialSet;
use crate::core::workflow;
use crate::error::{PublishError, Result};

/// Destination for published credentials.
pub trait CredentialPublisher: Send + Sync {
    fn publish(&self, credentials: &CredentialSet) -> Result<()>;
}

/// Publishes the way `core.exportVariable` does in GitHub Actions.
///
/// 1. Masks the secret key and session token (inside Actions only)
/// 2. Appends the entries to the `$GITHUB_ENV` file in one write
/// 3. Sets them in the current process environment
#[derive(Debug, Default)]
pub struct ActionsEnvPublisher {
    env_file: Option<PathBuf>,
    process_env: bool,
    mask: bool,
}

impl ActionsEnvPublisher {
    /// Publisher configured from the runner environment.
    pub fn from_env() -> Self {
        Self {
            env_file: std::env::var_os(GITHUB_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            process_env: true,
            mask: workflow::is_actions(),
        }
    }

    /// Publisher that only writes to `path`.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            env_file: Some(path.into()),
            process_env: false,
            mask: false,
        }
    }

    /// Also mask the secret values in the job log.
    pub fn masked(mut self) -> Self {
        self.mask = true;
        self
    }

    /// Also set the entries in the current process environment.
    pub fn exporting(mut self) -> Self {
        self.process_env = true;
        self
    }

    /// `::add-mask::` commands for the secret key and session token.
    pub fn mask_commands(&self, credentials: &CredentialSet) -> Vec<String> {
        if !self.mask {
            return Vec::new();
        }
        [credentials.secret_access_key(), credentials.session_token()]
            .into_iter()
            .filter(|v| !v.is_empty())
            .map(|v| workflow::command("add-mask", v))
            .collect()
    }

    fn append(path: &Path, block: &str) -> std::result::Result<(), PublishError> {
        let write = |path: &Path| -> std::io::Result<()> {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(block.as_bytes())
        };
        write(path).map_err(|source| PublishError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CredentialPublisher for ActionsEnvPublisher {
    fn publish(&self, credentials: &CredentialSet) -> Result<()> {
        let entries = credentials.entries();

        // Render before touching anything so a bad value publishes nothing.
        let block = match &self.env_file {
            Some(_) => Some(render_env_block(
                &entries,
                &format!("ghadelimiter_{}", uuid::Uuid::new_v4()),
            )?),
            None => None,
        };

        for line in self.mask_commands(credentials) {
            println!("{}", line);
        }

        if let (Some(path), Some(block)) = (&self.env_file, block) {
            Self::append(path, &block)?;
            debug!(path = %path.display(), "credentials appended to env file");
        }

        if self.process_env {
            for (name, value) in entries {
                std::env::set_var(name, value);
            }
        }

        debug!(
            access_key_id = credentials.access_key_id(),
            "credentials published"
        );
        Ok(())
    }
}

/// Render entries in the multi-line env file format:
///
/// ```text
/// NAME<<delimiter
/// value
/// delimiter
/// ```
pub fn render_env_block(
    entries: &[(&'static str, &str)],
    delimiter: &str,
) -> std::result::Result<String, PublishError> {
    let mut block = String::new();
    for (name, value) in entries {
        if value.contains(delimiter) {
            return Err(PublishError::DelimiterCollision(*name));
        }
        block.push_str(&format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"));
    }
    Ok(block)
}
