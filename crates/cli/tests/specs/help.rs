// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and usage specs

use crate::prelude::*;

#[test]
fn no_args_prints_usage_and_exits_two() {
    btpctl().fails().code_is(2).stderr_has("Usage:");
}

#[test]
fn help_lists_resource_commands() {
    btpctl()
        .args(&["--help"])
        .passes()
        .stdout_has("instance")
        .stdout_has("binding")
        .stdout_has("classify");
}

#[test]
fn instance_create_help_shows_polling_flags() {
    btpctl()
        .args(&["instance", "create", "--help"])
        .passes()
        .stdout_has("--timeout")
        .stdout_has("--poll-interval")
        .stdout_has("--tolerate-regressions");
}

#[test]
fn password_env_value_is_hidden_in_help() {
    btpctl()
        .env("BTP_PASSWORD", "do-not-print")
        .args(&["--help"])
        .passes()
        .stdout_lacks("do-not-print");
}

#[test]
fn version_shows_version() {
    btpctl().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn unknown_output_format_is_a_usage_error() {
    btpctl().args(&["-o", "yaml", "classify"]).fails().code_is(2);
}
