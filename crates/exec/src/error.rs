// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution error types.

/// Errors from running a single command.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The argument vector had no program.
    #[error("empty command")]
    EmptyCommand,

    /// The command exited with non-zero status. The display carries the
    /// trimmed stderr, which holds the tool's error description.
    #[error("command `{command}` failed with exit code {exit_code}{}", stderr_detail(.stderr))]
    CommandFailed { command: String, exit_code: i32, stderr: String },

    /// Command not found or could not be spawned.
    #[error("failed to spawn `{command}`: {source}")]
    SpawnFailed { command: String, source: std::io::Error },

    /// Writing the configured stdin failed.
    #[error("failed to write stdin of `{command}`: {source}")]
    Stdin { command: String, source: std::io::Error },
}

fn stderr_detail(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

impl ExecError {
    /// Exit code for [`ExecError::CommandFailed`], `None` otherwise.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::CommandFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
