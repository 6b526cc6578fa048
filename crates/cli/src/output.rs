// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use btp_core::{ErrorCode, ErrorRecord, ServiceBinding, ServiceInstance};
use btp_engine::ServiceError;
use clap::ValueEnum;
use std::io::{self, Write};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn field(out: &mut dyn Write, label: &str, value: &str) -> io::Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    writeln!(out, "{label:<16}{value}")
}

pub fn render_instance(record: &ServiceInstance, out: &mut dyn Write) -> io::Result<()> {
    field(out, "Name:", &record.name)?;
    field(out, "ID:", &record.id)?;
    field(out, "Ready:", if record.ready { "yes" } else { "no" })?;
    field(out, "Plan:", &record.service_plan_id)?;
    if let Some(op) = &record.last_operation {
        field(out, "Last operation:", &format!("{} {}", op.kind, op.state))?;
        field(out, "Description:", &op.description)?;
    }
    field(out, "Dashboard:", &record.dashboard_url)?;
    field(out, "Updated:", &record.updated_at)
}

/// Credential values are never printed in text mode, only their keys.
pub fn render_binding(record: &ServiceBinding, out: &mut dyn Write) -> io::Result<()> {
    field(out, "Name:", &record.name)?;
    field(out, "ID:", &record.id)?;
    field(out, "Ready:", if record.ready { "yes" } else { "no" })?;
    field(out, "Instance:", &record.service_instance_id)?;
    let keys: Vec<&str> = record.credentials.keys().map(String::as_str).collect();
    field(out, "Credentials:", &keys.join(", "))?;
    field(out, "Updated:", &record.updated_at)
}

/// Print a create/get result. JSON mode passes the normalised line through.
pub fn print_instance(format: OutputFormat, line: &str) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{line}"),
        OutputFormat::Text => render_instance(&ServiceInstance::parse(line)?, &mut io::stdout())?,
    }
    Ok(())
}

pub fn print_binding(format: OutputFormat, line: &str) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{line}"),
        OutputFormat::Text => render_binding(&ServiceBinding::parse(line)?, &mut io::stdout())?,
    }
    Ok(())
}

pub fn print_deleted(format: OutputFormat, kind: &str, name: &str) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let obj = serde_json::json!({ "deleted": true, "kind": kind, "name": name });
            println!("{}", serde_json::to_string(&obj)?);
        }
        OutputFormat::Text => println!("Deleted {kind} '{name}'"),
    }
    Ok(())
}

pub fn classification_json(record: &ErrorRecord, code: ErrorCode) -> serde_json::Value {
    serde_json::json!({
        "code": code,
        "error": record.error,
        "description": record.description,
    })
}

pub fn print_classification(
    format: OutputFormat,
    record: &ErrorRecord,
    code: ErrorCode,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&classification_json(record, code))?);
        }
        OutputFormat::Text => {
            let code = if code.is_classified() { code.as_str() } else { "unclassified" };
            println!("{code}");
            println!("{}: {}", record.error, record.description);
        }
    }
    Ok(())
}

/// Machine-readable failure, printed to stdout in JSON mode.
pub fn failure_json(err: &ServiceError) -> serde_json::Value {
    serde_json::json!({
        "error": err.to_string(),
        "operation": err.operation().to_string(),
        "category": err.category().to_string(),
        "code": err.code(),
    })
}
