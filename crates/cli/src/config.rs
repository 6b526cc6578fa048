// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection and polling settings.
//!
//! Each value resolves as: command-line flag > environment variable > config
//! file > built-in default. Unset connection values stay empty so the
//! service layer reports them as missing parameters.

use btp_core::{LoginOptions, Polling};
use btp_exec::RegressionPolicy;
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3600);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("invalid config {}: {source}", .path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub polling: PollingConfig,
}

/// `[connection]` table. Passwords are never read from the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionConfig {
    pub url: Option<String>,
    pub subdomain: Option<String>,
    pub user: Option<String>,
    pub idp: Option<String>,
    pub subaccount: Option<String>,
}

/// `[polling]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollingConfig {
    pub timeout_secs: Option<u64>,
    pub poll_interval_secs: Option<u64>,
    pub tolerate_regressions: Option<bool>,
}

impl Config {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Load `explicit` if given, else the path from [`crate::env::config_path`].
    ///
    /// A missing file is only an error when it was named explicitly.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match crate::env::config_path() {
                Some(found) => found,
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse(&text, &path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if required {
                    Err(ConfigError::NotFound(path))
                } else {
                    Ok(Self::default())
                }
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }
}

/// Global login and subaccount flags.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// BTP CLI server URL
    #[arg(long, global = true, env = "BTP_URL")]
    pub url: Option<String>,

    /// Global account subdomain
    #[arg(long, global = true, env = "BTP_SUBDOMAIN")]
    pub subdomain: Option<String>,

    /// User name or e-mail
    #[arg(long, global = true, env = "BTP_USER")]
    pub user: Option<String>,

    /// Password (prefer the environment variable)
    #[arg(long, global = true, env = "BTP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Custom identity provider origin key
    #[arg(long, global = true, env = "BTP_IDP")]
    pub idp: Option<String>,

    /// Subaccount ID
    #[arg(long, global = true, env = "BTP_SUBACCOUNT")]
    pub subaccount: Option<String>,
}

/// Flags for operations that wait on the platform.
#[derive(Args, Debug, Clone, Default)]
pub struct PollingArgs {
    /// Give up after this many seconds (default: 3600)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seconds between status checks (default: 10)
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Keep polling through up to three failed checks after progress
    #[arg(long)]
    pub tolerate_regressions: bool,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub login: LoginOptions,
    pub subaccount: String,
    pub polling: Polling,
    pub regression: RegressionPolicy,
}

impl Settings {
    pub fn resolve(connection: &ConnectionArgs, polling: &PollingArgs, config: &Config) -> Self {
        let file = &config.connection;
        let pick = |flag: &Option<String>, fallback: &Option<String>| {
            flag.clone().or_else(|| fallback.clone()).unwrap_or_default()
        };

        let login = LoginOptions::default()
            .url(pick(&connection.url, &file.url))
            .subdomain(pick(&connection.subdomain, &file.subdomain))
            .user(pick(&connection.user, &file.user))
            .password(connection.password.clone().unwrap_or_default())
            .idp(connection.idp.clone().or_else(|| file.idp.clone()).filter(|s| !s.is_empty()));

        let secs = |flag: Option<u64>, fallback: Option<u64>, default: Duration| {
            flag.or(fallback).map(Duration::from_secs).unwrap_or(default)
        };
        let timeout = secs(polling.timeout, config.polling.timeout_secs, DEFAULT_TIMEOUT);
        let interval =
            secs(polling.poll_interval, config.polling.poll_interval_secs, DEFAULT_POLL_INTERVAL);

        let tolerate =
            polling.tolerate_regressions || config.polling.tolerate_regressions.unwrap_or(false);

        Self {
            login,
            subaccount: pick(&connection.subaccount, &file.subaccount),
            polling: Polling::new(timeout, interval),
            regression: if tolerate { RegressionPolicy::Tolerate } else { RegressionPolicy::FailFast },
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
