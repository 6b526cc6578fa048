// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed views of the service records printed by `btp get`.
//!
//! Only the fields callers act on are modelled; everything is optional on
//! the wire so a partial document (e.g. `{"ready": true}`) still decodes.

use crate::payload::{to_json, PayloadError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State of the most recent asynchronous operation on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OperationState {
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "succeeded")]
    Succeeded,
    #[serde(rename = "failed")]
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

crate::simple_display! {
    OperationState {
        InProgress => "in progress",
        Succeeded => "succeeded",
        Failed => "failed",
        Unknown => "unknown",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastOperation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub state: OperationState,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInstance {
    pub id: String,
    pub ready: bool,
    pub name: String,
    pub service_plan_id: String,
    pub platform_id: String,
    pub dashboard_url: String,
    pub last_operation: Option<LastOperation>,
    pub context: Map<String, Value>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceBinding {
    pub id: String,
    pub ready: bool,
    pub name: String,
    pub service_instance_id: String,
    pub credentials: Map<String, Value>,
    pub context: Map<String, Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl ServiceInstance {
    /// Decode `btp get services/instance` output.
    pub fn parse(text: &str) -> Result<Self, PayloadError> {
        parse_record(text)
    }
}

impl ServiceBinding {
    /// Decode `btp get services/binding` output.
    pub fn parse(text: &str) -> Result<Self, PayloadError> {
        parse_record(text)
    }
}

/// JSON when the output looks like JSON, otherwise the tool's YAML-style
/// listing with its trailing status line removed.
fn parse_record<T: DeserializeOwned>(text: &str) -> Result<T, PayloadError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        let line = to_json(trimmed)?;
        return Ok(serde_json::from_str(&line)?);
    }

    let body = strip_status_lines(text);
    if body.trim().is_empty() {
        return Err(PayloadError::EmptyOutput);
    }
    Ok(serde_norway::from_str(&body)?)
}

fn strip_status_lines(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    while let Some(last) = lines.last() {
        let last = last.trim();
        if last.is_empty() || last == "OK" || last == "FAILED" {
            lines.pop();
        } else {
            break;
        }
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
