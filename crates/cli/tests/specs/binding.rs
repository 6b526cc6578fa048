// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `btpctl binding` specs

use crate::prelude::*;

#[test]
fn create_binds_to_named_instance() {
    let fake = FakeBtp::new(
        r#"
*"get services/binding"*)
  if [ "$(nth get)" -lt 2 ]; then
    echo '{"ready": false, "name": "creds"}'
  else
    echo '{"ready": true, "name": "creds", "credentials": {"token": "t0k", "uri": "https://svc.test"}}'
  fi ;;
"#,
    );

    btpctl()
        .against(&fake)
        .args(&["binding", "create", "creds", "--instance", "db", "--poll-interval", "1"])
        .passes()
        .stdout_has("Name:           creds\n")
        .stdout_has("Credentials:    token, uri\n")
        .stdout_lacks("t0k");

    assert_eq!(
        fake.count("create services/binding --name creds --instance-name db --subaccount sub-1"),
        1
    );
}

#[test]
fn create_with_parameters_passes_them_through() {
    let fake = FakeBtp::new(r#"*"get services/binding"*) echo '{"ready": true}' ;;"#);

    btpctl()
        .against(&fake)
        .args(&["binding", "create", "creds", "--instance", "db"])
        .args(&["--parameters", r#"{"role":"reader"}"#, "--poll-interval", "1"])
        .passes();

    assert_eq!(fake.count(r#"--parameters {"role":"reader"}"#), 1);
}

#[test]
fn missing_subaccount_and_zero_timeout_are_reported() {
    let fake = FakeBtp::new("");

    btpctl()
        .against(&fake)
        .env("BTP_SUBACCOUNT", "")
        .args(&["binding", "create", "creds", "--instance", "db", "--timeout", "0"])
        .fails()
        .stderr_has("Creation of service binding failed: parameters missing, please provide Subaccount, Timeout");
    assert_eq!(fake.calls(), vec!["set config --format json"]);
}

#[test]
fn get_prints_json_line() {
    let fake = FakeBtp::new(
        r#"*"get services/binding"*) printf '{\n  "ready": true,\n  "name": "creds"\n}\n' ;;"#,
    );

    let out = btpctl().against(&fake).args(&["-o", "json", "binding", "get", "creds"]).passes();

    assert_eq!(out.stdout.lines().count(), 1);
    assert_eq!(out.json()["name"], "creds");
}

#[test]
fn delete_waits_until_not_found() {
    let fake = FakeBtp::new(&format!(
        "*\"get services/binding\"*) echo '{BINDING_NOT_FOUND}' >&2; exit 1 ;;"
    ));

    let out = btpctl()
        .against(&fake)
        .args(&["-o", "json", "binding", "delete", "creds", "--poll-interval", "1"])
        .passes();

    let value = out.json();
    assert_eq!(value["deleted"], true);
    assert_eq!(value["kind"], "service binding");
    assert_eq!(fake.count("delete services/binding --name creds --subaccount sub-1 --confirm"), 1);
}

#[test]
fn delete_with_wrong_not_found_fails_fast() {
    let fake = FakeBtp::new(&format!(
        r#"
*"get services/binding"*)
  if [ "$(nth get)" -lt 2 ]; then echo '{{"ready": true}}'; else echo '{INSTANCE_NOT_FOUND}' >&2; exit 1; fi ;;
"#
    ));

    btpctl()
        .against(&fake)
        .args(&["binding", "delete", "creds", "--poll-interval", "1", "--timeout", "30"])
        .fails()
        .stderr_has("Deletion of service binding failed: status check failed after progress");
}

#[test]
fn tolerated_regressions_can_recover() {
    let fake = FakeBtp::new(&format!(
        r#"
*"get services/binding"*)
  case "$(nth get)" in
    1) echo '{{"ready": true}}' ;;
    2) echo '{INSTANCE_NOT_FOUND}' >&2; exit 1 ;;
    *) echo '{BINDING_NOT_FOUND}' >&2; exit 1 ;;
  esac ;;
"#
    ));

    btpctl()
        .against(&fake)
        .args(&["binding", "delete", "creds", "--poll-interval", "1", "--tolerate-regressions"])
        .passes()
        .stdout_has("Deleted service binding 'creds'");
    assert_eq!(fake.count("get services/binding"), 3);
}
