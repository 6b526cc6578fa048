// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `btpctl instance` specs

use crate::prelude::*;

const BECOMES_READY: &str = r#"
*"get services/instance"*)
  if [ "$(nth get)" -lt 2 ]; then
    echo '{"ready": false, "name": "db"}'
  else
    printf '{\n  "ready": true,\n  "name": "db",\n  "id": "i-1"\n}\n'
  fi ;;
"#;

#[test]
fn create_waits_until_ready() {
    let fake = FakeBtp::new(BECOMES_READY);

    let out = btpctl()
        .against(&fake)
        .args(&["-o", "json", "instance", "create", "db", "--plan", "standard", "--offering", "hana"])
        .args(&["--poll-interval", "1"])
        .passes();

    let record = out.json();
    assert_eq!(record["name"], "db");
    assert_eq!(record["ready"], true);

    let calls = fake.calls();
    similar_asserts::assert_eq!(
        calls,
        vec![
            "set config --format json",
            "--format json login --url https://cli.btp.test --subdomain acme --user ops@acme.test --password s3cret",
            "--format json create services/instance --name db --subaccount sub-1 --plan-name standard --offering-name hana",
            "--format json get services/instance --name db --subaccount sub-1",
            "--format json get services/instance --name db --subaccount sub-1",
            "--format json logout",
        ]
    );
}

#[test]
fn get_prints_text_summary() {
    let fake = FakeBtp::new(
        r#"*"get services/instance"*) printf '{\n  "ready": true,\n  "name": "db",\n  "id": "i-1"\n}\n' ;;"#,
    );

    btpctl()
        .against(&fake)
        .args(&["instance", "get", "db"])
        .passes()
        .stdout_has("Name:           db\n")
        .stdout_has("Ready:          yes\n")
        .stdout_has("ID:             i-1\n");
}

#[test]
fn get_missing_instance_reports_code() {
    let fake = FakeBtp::new(&format!(
        "*\"get services/instance\"*) echo '{INSTANCE_NOT_FOUND}' >&2; exit 1 ;;"
    ));

    btpctl()
        .against(&fake)
        .args(&["instance", "get", "db"])
        .fails()
        .code_is(1)
        .stderr_has("Retrieve service instance failed")
        .stderr_has("[configuration, SERVICE_INSTANCE_NOT_FOUND]");
    assert_eq!(fake.count("logout"), 1);
}

#[test]
fn json_failure_is_machine_readable() {
    let fake = FakeBtp::new(&format!(
        "*\"get services/instance\"*) echo '{INSTANCE_NOT_FOUND}' >&2; exit 1 ;;"
    ));

    let out = btpctl().against(&fake).args(&["-o", "json", "instance", "get", "db"]).fails();

    let value = out.json();
    assert_eq!(value["code"], "SERVICE_INSTANCE_NOT_FOUND");
    assert_eq!(value["operation"], "Retrieve service instance");
}

#[test]
fn delete_waits_until_not_found() {
    let fake = FakeBtp::new(&format!(
        r#"
*"get services/instance"*)
  if [ "$(nth get)" -lt 2 ]; then echo '{{"ready": true}}'; else echo '{INSTANCE_NOT_FOUND}' >&2; exit 1; fi ;;
"#
    ));

    btpctl()
        .against(&fake)
        .args(&["instance", "delete", "db", "--poll-interval", "1"])
        .passes()
        .stdout_has("Deleted service instance 'db'");

    assert_eq!(
        fake.count("delete services/instance --name db --subaccount sub-1 --confirm"),
        1
    );
    assert_eq!(fake.count("get services/instance"), 2);
}

#[test]
fn missing_parameters_are_listed_before_login() {
    let fake = FakeBtp::new("");

    btpctl()
        .env("BTP_BIN", fake.path())
        .args(&["instance", "create", "db", "--plan", "p", "--offering", "o", "--timeout", "0"])
        .fails()
        .stderr_has("Creation of service instance failed")
        .stderr_has("parameters missing, please provide Url, Subdomain, User, Password, Subaccount, Timeout");
    assert_eq!(fake.calls(), vec!["set config --format json"]);
}

#[test]
fn create_conflict_reports_code() {
    let fake = FakeBtp::new(
        r#"*"create services/instance"*) echo 'Response mapping: {"error": "Conflict", "description": "instance with same name exists for the current tenant"}' >&2; exit 1 ;;"#,
    );

    btpctl()
        .against(&fake)
        .args(&["instance", "create", "db", "--plan", "p", "--offering", "o"])
        .fails()
        .stderr_has("Creation of service instance failed: start command failed")
        .stderr_has("instance with same name exists for the current tenant")
        .stderr_has("[configuration, INSTANCE_ALREADY_EXISTS]");
    assert_eq!(fake.count("get services/instance"), 0);
    assert_eq!(fake.count("logout"), 1);
}

#[test]
fn output_format_failure_stops_before_login() {
    let fake = FakeBtp::new("*\"set config\"*) echo 'config is read-only' >&2; exit 1 ;;");

    btpctl()
        .against(&fake)
        .args(&["instance", "get", "db"])
        .fails()
        .stderr_has("Configuration of output format failed")
        .stderr_has("config is read-only");
    assert_eq!(fake.calls(), vec!["set config --format json"]);
}

#[test]
fn login_failure_stops_the_operation() {
    let fake = FakeBtp::new("*\" login \"*) echo 'Authentication failed' >&2; exit 1 ;;");

    btpctl()
        .against(&fake)
        .args(&["instance", "get", "db"])
        .fails()
        .stderr_has("Login to BTP failed")
        .stderr_has("[infrastructure]");
    assert_eq!(fake.calls().len(), 2);
    assert_eq!(fake.count("logout"), 0);
}

#[test]
fn create_times_out() {
    let fake = FakeBtp::new(r#"*"get services/instance"*) echo '{"ready": false}' ;;"#);

    btpctl()
        .against(&fake)
        .args(&["instance", "create", "db", "--plan", "p", "--offering", "o"])
        .args(&["--timeout", "2", "--poll-interval", "1"])
        .fails()
        .stderr_has("Creation of service instance failed: timed out after 2s");
    assert_eq!(fake.count("logout"), 1);
}

#[test]
fn config_file_supplies_connection_and_polling() {
    let fake = FakeBtp::new(r#"*"get services/instance"*) echo '{"ready": true}' ;;"#);
    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("btpctl.toml");
    std::fs::write(
        &config,
        r#"
[connection]
url = "https://from-file.test"
subdomain = "filesub"
user = "file-user"
subaccount = "file-account"

[polling]
poll_interval_secs = 1
"#,
    )
    .unwrap();

    btpctl()
        .env("BTP_BIN", fake.path())
        .env("BTP_PASSWORD", "pw")
        .env("BTP_SUBDOMAIN", "envsub")
        .config_file(&config)
        .args(&["instance", "create", "db", "--plan", "p", "--offering", "o"])
        .passes();

    let calls = fake.calls();
    assert_eq!(
        calls[1],
        "--format json login --url https://from-file.test --subdomain envsub --user file-user --password pw"
    );
    assert!(calls[2].contains("--subaccount file-account"), "{}", calls[2]);
}

#[test]
fn missing_explicit_config_fails() {
    btpctl()
        .config_file(Path::new("/nonexistent/btpctl.toml"))
        .args(&["instance", "get", "db"])
        .fails()
        .stderr_has("config file not found");
}

#[test]
fn log_file_records_commands_without_password() {
    let fake = FakeBtp::new(r#"*"get services/instance"*) echo '{"ready": true}' ;;"#);
    let dir = tempfile::TempDir::new().unwrap();
    let log = dir.path().join("btpctl.log");

    btpctl()
        .against(&fake)
        .env("BTPCTL_LOG", "debug")
        .args(&["instance", "get", "db", "--log-file", log.to_str().unwrap()])
        .passes();

    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains("btp.exec"), "{text}");
    assert!(text.contains("--password ****"), "{text}");
    assert!(!text.contains("s3cret"), "{text}");
}
