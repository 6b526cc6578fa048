// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Handlers return `ExitError` instead of calling `std::process::exit()`
//! so that `main()` owns process termination and log flushing.

use btp_engine::ServiceError;
use std::fmt;

/// Exit code for any failed operation. Usage errors exit with clap's 2.
pub const FAILURE: i32 = 1;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl From<&ServiceError> for ExitError {
    /// Appends the category and, when known, the classified tool error.
    fn from(err: &ServiceError) -> Self {
        let message = match err.code() {
            Some(code) => format!("{err} [{}, {code}]", err.category()),
            None => format!("{err} [{}]", err.category()),
        };
        Self::new(FAILURE, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
