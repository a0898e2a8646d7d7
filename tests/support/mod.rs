//! Test support utilities for roleshift integration tests.
//!
//! Provides an isolated environment for the binary plus mock collaborators
//! for driving the federation in-process.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod mocks;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Variables the binary reads from its environment. Cleared for every test
/// so the host (possibly a GitHub runner itself) cannot leak in.
const HOST_VARS: &[&str] = &[
    "INPUT_ROLE-ARN",
    "REGION",
    "ROLESHIFT_MODE",
    "ROLESHIFT_LOG",
    "ROLESHIFT_LOG_FORMAT",
    "ROLESHIFT_BROKER_ROLE_ARN",
    "ROLESHIFT_PROBE_BUCKET",
    "ROLESHIFT_ENDPOINT_URL",
    "GITHUB_ACTIONS",
    "GITHUB_RUN_ID",
    "GITHUB_EVENT_NAME",
    "GITHUB_WORKFLOW_REF",
    "GITHUB_REPOSITORY",
    "ACTIONS_ID_TOKEN_REQUEST_URL",
    "ACTIONS_ID_TOKEN_REQUEST_TOKEN",
    "ACCESS_TOKEN",
    "TARGET_ROLE_ARN",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
    "AWS_PROFILE",
    "AWS_REGION",
    "AWS_CONFIG_FILE",
    "AWS_SHARED_CREDENTIALS_FILE",
];

/// Test environment with isolated temp directories.
///
/// Each test gets its own working dir, home dir and `GITHUB_ENV` file path.
/// No process-global state is mutated, so tests can run in parallel.
pub struct Test {
    /// Working directory of the binary
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        Self { dir, home }
    }

    /// Path the binary publishes credentials to.
    pub fn env_file(&self) -> PathBuf {
        self.dir.path().join("github_env")
    }

    /// Contents of the env file, empty if never written.
    pub fn env_file_contents(&self) -> String {
        std::fs::read_to_string(self.env_file()).unwrap_or_default()
    }

    /// Write `.roleshift.toml` in the working directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.dir.path().join(".roleshift.toml"), contents)
            .expect("failed to write config");
    }

    /// A roleshift command with a clean environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("roleshift").expect("failed to find roleshift binary");
        for var in HOST_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env("GITHUB_ENV", self.env_file());
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// `roleshift run` with a full invocation context.
    pub fn run_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("run")
            .env("GITHUB_RUN_ID", RUN_ID)
            .env("GITHUB_EVENT_NAME", EVENT)
            .env("GITHUB_WORKFLOW_REF", WORKFLOW_REF)
            .env("GITHUB_REPOSITORY", REPOSITORY);
        cmd
    }
}
