// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `btpctl classify` specs

use crate::prelude::*;

#[test]
fn classifies_stdin() {
    btpctl()
        .args(&["classify"])
        .stdin(&format!("FAILED\n{BINDING_NOT_FOUND}\n"))
        .passes()
        .stdout_has("SERVICE_BINDING_NOT_FOUND")
        .stdout_has("NotFound: could not find such binding");
}

#[test]
fn last_block_wins() {
    let text = format!(
        "{INSTANCE_NOT_FOUND}\nResponse mapping: {{\"error\": \"Conflict\", \"description\": \"binding with same name exists for instance db\"}}\n"
    );
    let out = btpctl().args(&["-o", "json", "classify"]).stdin(&text).passes();
    let value = out.json();
    assert_eq!(value["code"], "BINDING_ALREADY_EXISTS");
    assert_eq!(value["error"], "Conflict");
}

#[test]
fn reads_file_argument() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("captured.txt");
    std::fs::write(&path, INSTANCE_NOT_FOUND).unwrap();

    btpctl()
        .args(&["classify", path.to_str().unwrap()])
        .passes()
        .stdout_has("SERVICE_INSTANCE_NOT_FOUND");
}

#[test]
fn unknown_description_is_unclassified() {
    btpctl()
        .args(&["classify"])
        .stdin(r#"Response mapping: {"error": "Forbidden", "description": "not allowed"}"#)
        .passes()
        .stdout_has("unclassified");
}

#[test]
fn text_without_block_fails() {
    btpctl()
        .args(&["classify"])
        .stdin("OK\n")
        .fails()
        .code_is(1)
        .stderr_has("no error block found");
}
