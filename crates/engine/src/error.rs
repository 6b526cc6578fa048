// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service-level errors.

use btp_core::{BuildError, ErrorCode, MissingParameters, PayloadError};
use btp_exec::{ExecError, PollError};
use thiserror::Error;

/// The operation an error belongs to. Its display text prefixes every
/// error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Logout,
    ConfigureOutput,
    CreateInstance,
    GetInstance,
    DeleteInstance,
    CreateBinding,
    GetBinding,
    DeleteBinding,
}

btp_core::simple_display! {
    Operation {
        Login => "Login to BTP",
        Logout => "Logout of BTP",
        ConfigureOutput => "Configuration of output format",
        CreateInstance => "Creation of service instance",
        GetInstance => "Retrieve service instance",
        DeleteInstance => "Deletion of service instance",
        CreateBinding => "Creation of service binding",
        GetBinding => "Retrieve service binding",
        DeleteBinding => "Deletion of service binding",
    }
}

/// Coarse failure category reported alongside the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request or the remote resource is misconfigured.
    Configuration,
    /// Authentication or session handling failed.
    Infrastructure,
    Undefined,
}

btp_core::simple_display! {
    ErrorCategory {
        Configuration => "configuration",
        Infrastructure => "infrastructure",
        Undefined => "undefined",
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{operation} failed: {source}")]
    MissingParameters { operation: Operation, source: MissingParameters },

    #[error("{operation} failed: {source}")]
    Build { operation: Operation, source: BuildError },

    #[error("Login to BTP failed: {0}")]
    Login(#[source] ExecError),

    #[error("Logout of BTP failed: {0}")]
    Logout(#[source] ExecError),

    /// A single command failed. `code` classifies the tool's error output.
    #[error("{operation} failed: {source}")]
    Exec { operation: Operation, source: ExecError, code: ErrorCode },

    /// Polling failed. `code` classifies the start command's error output
    /// when the start command itself failed.
    #[error("{operation} failed: {source}")]
    Poll { operation: Operation, source: PollError, code: ErrorCode },

    #[error("{operation} failed: {source}")]
    Payload { operation: Operation, source: PayloadError },
}

impl ServiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::Exec { .. } | ServiceError::Poll { .. } => ErrorCategory::Configuration,
            ServiceError::Login(_) | ServiceError::Logout(_) => ErrorCategory::Infrastructure,
            ServiceError::MissingParameters { .. }
            | ServiceError::Build { .. }
            | ServiceError::Payload { .. } => ErrorCategory::Undefined,
        }
    }

    /// Classified tool error, if the failure came with one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ServiceError::Exec { code, .. } | ServiceError::Poll { code, .. }
                if code.is_classified() =>
            {
                Some(*code)
            }
            _ => None,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            ServiceError::MissingParameters { operation, .. }
            | ServiceError::Build { operation, .. }
            | ServiceError::Exec { operation, .. }
            | ServiceError::Poll { operation, .. }
            | ServiceError::Payload { operation, .. } => *operation,
            ServiceError::Login(_) => Operation::Login,
            ServiceError::Logout(_) => Operation::Logout,
        }
    }
}
