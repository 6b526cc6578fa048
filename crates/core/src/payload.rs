// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalisation of captured tool output.

use thiserror::Error;

/// Errors from normalising or decoding captured output.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("the returned value is empty")]
    EmptyOutput,

    #[error("no error block found in output")]
    NoErrorBlock,

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Collapse pretty-printed output into a single logical line.
///
/// No schema validation happens here; the result is whatever the tool
/// printed, minus `\n`. A `\r` is kept; it is JSON whitespace.
pub fn to_json(captured: &str) -> Result<String, PayloadError> {
    if captured.is_empty() {
        return Err(PayloadError::EmptyOutput);
    }
    Ok(captured.replace('\n', ""))
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
