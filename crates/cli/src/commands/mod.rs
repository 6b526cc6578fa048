// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod binding;
pub mod classify;
pub mod instance;

use crate::config::Settings;
use crate::exit_error::ExitError;
use crate::output::{failure_json, OutputFormat};
use btp_engine::{BtpClient, ServiceError};
use btp_exec::ProcessExecutor;

/// Client over the real tool with JSON set as its default output format.
/// `BTP_BIN` replaces the spawned binary; the argument vector still names
/// `btp`.
pub async fn client(
    settings: &Settings,
    format: OutputFormat,
) -> anyhow::Result<BtpClient<ProcessExecutor>> {
    let executor = match crate::env::btp_bin() {
        Some(bin) => ProcessExecutor::new().with_program(bin),
        None => ProcessExecutor::new(),
    };
    let client = BtpClient::new(executor).with_regression(settings.regression);
    client.configure_output().await.map_err(|e| fail(format, e))?;
    Ok(client)
}

/// Report a service failure in the selected format and convert it for `main`.
pub(crate) fn fail(format: OutputFormat, err: ServiceError) -> anyhow::Error {
    tracing::debug!(error = ?err, "operation failed");
    if format == OutputFormat::Json {
        println!("{}", failure_json(&err));
    }
    ExitError::from(&err).into()
}
