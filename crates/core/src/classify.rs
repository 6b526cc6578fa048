// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error classification for captured `btp` output.
//!
//! On failure the tool prints one or more blocks of the form
//!
//! ```text
//! Response mapping: {"error": "<token>", "description": "<text>"}
//! ```
//!
//! Only the last block counts. Its description is mapped onto a closed set of
//! [`ErrorCode`]s by an ordered list of case-insensitive phrase matchers.
//! Callers match on the codes, so the set and the matcher order are part of
//! the public contract.

use crate::payload::PayloadError;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Literal that precedes an error block in tool output.
pub const RESPONSE_MAPPING: &str = "Response mapping";

#[allow(clippy::expect_used)]
static BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{\s*"error"\s*:"#).expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static DESCRIPTION_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""description"\s*:"#).expect("constant regex pattern is valid"));

/// Error block reported by the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
    #[serde(default)]
    pub description: String,
}

/// Stable classification of a tool error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MultipleBindingsFound,
    BindingAlreadyExists,
    ServiceInstanceNotFound,
    ServiceBindingNotFound,
    InstanceAlreadyExists,
    /// No matcher fired. Rendered as the empty string.
    Unclassified,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleBindingsFound => "MULTIPLE_BINDINGS_FOUND",
            Self::BindingAlreadyExists => "BINDING_ALREADY_EXISTS",
            Self::ServiceInstanceNotFound => "SERVICE_INSTANCE_NOT_FOUND",
            Self::ServiceBindingNotFound => "SERVICE_BINDING_NOT_FOUND",
            Self::InstanceAlreadyExists => "INSTANCE_ALREADY_EXISTS",
            Self::Unclassified => "",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ServiceInstanceNotFound | Self::ServiceBindingNotFound)
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, Self::Unclassified)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Phrase matchers in priority order. The first entry with any matching
/// phrase wins. Phrases are lowercase.
const MATCHERS: [(&[&str], ErrorCode); 5] = [
    (&["found multiple service bindings with the name"], ErrorCode::MultipleBindingsFound),
    (&["binding with same name exists for instance"], ErrorCode::BindingAlreadyExists),
    (
        &["could not find such instance", "could not find such service instance"],
        ErrorCode::ServiceInstanceNotFound,
    ),
    (
        &["could not find such binding", "could not find such service binding"],
        ErrorCode::ServiceBindingNotFound,
    ),
    (&["instance with same name exists for the current tenant"], ErrorCode::InstanceAlreadyExists),
];

/// Map a free-form description onto an [`ErrorCode`].
pub fn classify(description: &str) -> ErrorCode {
    let description = description.to_lowercase();
    MATCHERS
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|phrase| description.contains(phrase)))
        .map(|(_, code)| *code)
        .unwrap_or(ErrorCode::Unclassified)
}

/// Return the last `{"error": ..., "description": ...}` object that follows
/// the final `Response mapping` sentinel.
///
/// The scan resumes after the end of each closed object, so heads nested
/// inside an earlier object are not candidates of their own.
pub fn extract_last_error_block(text: &str) -> Result<&str, PayloadError> {
    let segment = text.rsplit(RESPONSE_MAPPING).next().unwrap_or(text);

    let mut last = None;
    let mut from = 0;
    while let Some(head) = BLOCK_START.find_at(segment, from) {
        let start = head.start();
        match balanced_end(segment, start) {
            Some(end) => {
                let candidate = &segment[start..=end];
                if DESCRIPTION_KEY.is_match(candidate) {
                    last = Some(candidate);
                }
                from = end + 1;
            }
            // Unclosed; a later head may still close.
            None => from = start + 1,
        }
    }
    last.ok_or(PayloadError::NoErrorBlock)
}

/// Extract, decode and classify the last error block in `text`.
pub fn get_error_info(text: &str) -> Result<(ErrorRecord, ErrorCode), PayloadError> {
    let block = extract_last_error_block(text)?;
    let record: ErrorRecord = serde_json::from_str(block)?;
    let code = classify(&record.description);
    Ok((record, code))
}

/// Byte index of the `}` closing the object that opens at `start`.
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
