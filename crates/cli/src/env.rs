// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.
//!
//! Connection flags read their own variables through clap (`BTP_URL`,
//! `BTP_SUBDOMAIN`, `BTP_USER`, `BTP_PASSWORD`, `BTP_IDP`, `BTP_SUBACCOUNT`);
//! everything else is resolved here.

use std::path::PathBuf;

/// Path or name of the BTP CLI executable. Falls back to `btp` on `PATH`.
pub fn btp_bin() -> Option<String> {
    std::env::var("BTP_BIN").ok().filter(|s| !s.is_empty())
}

/// Log filter directives (`EnvFilter` syntax).
pub fn log_filter() -> Option<String> {
    std::env::var("BTPCTL_LOG").ok().filter(|s| !s.is_empty())
}

/// Resolve the config file: `BTPCTL_CONFIG` > `<config_dir>/btpctl/config.toml`.
///
/// The second element is true when the path was named explicitly and must
/// therefore exist.
pub fn config_path() -> Option<(PathBuf, bool)> {
    if let Ok(path) = std::env::var("BTPCTL_CONFIG") {
        if !path.is_empty() {
            return Some((PathBuf::from(path), true));
        }
    }
    dirs::config_dir().map(|dir| (dir.join("btpctl").join("config.toml"), false))
}
