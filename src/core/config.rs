//! Configuration file management.
//!
//! Handles reading and validating `.roleshift.toml` and merging command-line
//! overrides on top of it.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::RoleArn;
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// Execution mode, chosen once at startup.
///
/// Selects the token provider and role resolver strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Fresh OIDC token from the Actions runtime, caller-requested role
    #[default]
    Production,
    /// Static token from `ACCESS_TOKEN`, optional `TARGET_ROLE_ARN` override
    Development,
}

/// Project configuration stored in `.roleshift.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// AWS region for STS and S3 calls
    pub region: Option<String>,
    /// First hop: web-identity exchange against the broker role
    pub broker: BrokerConfig,
    /// Second hop: tagged assumption of the requested role
    pub target: TargetConfig,
    /// Smoke-test probe
    pub probe: ProbeConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrokerConfig {
    /// Role trusted by the OIDC provider. No built-in default.
    pub role_arn: Option<String>,
    pub session_name: String,
    pub duration_seconds: i32,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            role_arn: None,
            session_name: constants::BROKER_SESSION_NAME.to_string(),
            duration_seconds: constants::BROKER_DURATION_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    pub duration_seconds: i32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            duration_seconds: constants::TARGET_DURATION_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    pub bucket: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            bucket: constants::PROBE_BUCKET.to_string(),
        }
    }
}

/// Values given on the command line (or their env fallbacks).
#[derive(Debug, Default)]
pub struct Overrides {
    pub region: Option<String>,
    pub broker_role_arn: Option<String>,
    pub probe_bucket: Option<String>,
}

/// Validated settings the federation runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub region: String,
    pub broker_role: RoleArn,
    pub broker_session_name: String,
    pub broker_duration_secs: i32,
    pub target_duration_secs: i32,
    pub probe_bucket: String,
}

impl Config {
    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one,
    /// `.roleshift.toml` is read if present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound`, `ConfigError::ReadFile` or
    /// `ConfigError::Parse`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if !p.exists() => {
                return Err(ConfigError::NotFound(p.to_path_buf()).into());
            }
            Some(p) => p.to_path_buf(),
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents).map_err(ConfigError::Parse)?)
    }

    /// Apply command-line overrides. Set values win over the file.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(region) = overrides.region.filter(|r| !r.is_empty()) {
            self.region = Some(region);
        }
        if let Some(arn) = overrides.broker_role_arn.filter(|a| !a.is_empty()) {
            self.broker.role_arn = Some(arn);
        }
        if let Some(bucket) = overrides.probe_bucket.filter(|b| !b.is_empty()) {
            self.probe.bucket = bucket;
        }
    }

    /// Effective region.
    pub fn region(&self) -> &str {
        self.region
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(constants::DEFAULT_REGION)
    }

    /// Validate the merged configuration and produce run settings.
    ///
    /// Checks:
    /// - The broker role is present and is a valid role ARN
    /// - The broker session name is a valid STS session name
    /// - Both durations are within STS bounds
    /// - The second hop lives strictly shorter than the first
    /// - The probe bucket is set
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` or `ConfigError::InvalidValue`.
    pub fn settings(&self) -> Result<Settings> {
        debug!("validating config");

        let raw = self
            .broker
            .role_arn
            .as_deref()
            .ok_or(ConfigError::MissingField {
                field: "broker.role_arn",
            })?;
        let broker_role = RoleArn::parse(raw).map_err(|e| ConfigError::InvalidValue {
            field: "broker.role_arn",
            reason: e.to_string(),
        })?;

        validation::validate_session_name(&self.broker.session_name).map_err(|reason| {
            ConfigError::InvalidValue {
                field: "broker.session_name",
                reason,
            }
        })?;

        check_duration("broker.duration_seconds", self.broker.duration_seconds)?;
        check_duration("target.duration_seconds", self.target.duration_seconds)?;
        if self.target.duration_seconds >= self.broker.duration_seconds {
            return Err(ConfigError::InvalidValue {
                field: "target.duration_seconds",
                reason: format!(
                    "must be shorter than broker.duration_seconds ({})",
                    self.broker.duration_seconds
                ),
            }
            .into());
        }

        if self.probe.bucket.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "probe.bucket",
            }
            .into());
        }

        Ok(Settings {
            region: self.region().to_string(),
            broker_role,
            broker_session_name: self.broker.session_name.clone(),
            broker_duration_secs: self.broker.duration_seconds,
            target_duration_secs: self.target.duration_seconds,
            probe_bucket: self.probe.bucket.clone(),
        })
    }
}

fn check_duration(field: &'static str, secs: i32) -> Result<()> {
    if !(constants::MIN_DURATION_SECS..=constants::MAX_DURATION_SECS).contains(&secs) {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!(
                "{} is outside {}..={} seconds",
                secs,
                constants::MIN_DURATION_SECS,
                constants::MAX_DURATION_SECS
            ),
        }
        .into());
    }
    Ok(())
}
