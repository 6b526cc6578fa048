// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `btpctl classify`: map captured tool output onto an error code.

use anyhow::{Context, Result};
use btp_core::get_error_info;
use std::io::Read;
use std::path::PathBuf;

use crate::exit_error::{ExitError, FAILURE};
use crate::output::{print_classification, OutputFormat};

pub fn handle(file: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let text = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
            text
        }
    };

    let (record, code) =
        get_error_info(&text).map_err(|e| ExitError::new(FAILURE, e.to_string()))?;
    print_classification(format, &record, code)
}
