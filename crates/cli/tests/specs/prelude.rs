// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: a scripted `btp` executable and a fluent runner.

pub use std::path::Path;
pub use std::time::Duration;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

/// Error block the tool prints when an instance does not exist.
pub const INSTANCE_NOT_FOUND: &str =
    r#"Response mapping: {"error": "NotFound", "description": "could not find such instance"}"#;

/// Error block the tool prints when a binding does not exist.
pub const BINDING_NOT_FOUND: &str =
    r#"Response mapping: {"error": "NotFound", "description": "could not find such binding"}"#;

/// A `btp` stand-in written as a shell script.
///
/// Every invocation appends its arguments to `calls.log`. `cases` is the
/// body of a `case "$*" in ... esac`; unmatched invocations exit 0 with no
/// output. `nth KEY` prints how many times it has been called with `KEY`.
pub struct FakeBtp {
    dir: TempDir,
}

impl FakeBtp {
    pub fn new(cases: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let script = format!(
            r#"#!/bin/sh
DIR='{dir}'
printf '%s\n' "$*" >> "$DIR/calls.log"
nth() {{
  n=$(cat "$DIR/$1.count" 2>/dev/null || echo 0)
  n=$((n + 1))
  echo "$n" > "$DIR/$1.count"
  echo "$n"
}}
case "$*" in
{cases}
esac
exit 0
"#,
            dir = dir.path().display(),
        );

        let path = dir.path().join("btp");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("btp")
    }

    /// Arguments of every invocation so far, without the program name.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.calls().iter().filter(|call| call.contains(needle)).count()
    }
}

pub struct Cli {
    cmd: assert_cmd::Command,
    _home: TempDir,
}

/// `btpctl` with a private config home and no inherited BTP settings.
pub fn btpctl() -> Cli {
    let home = TempDir::new().unwrap();
    let mut cmd = assert_cmd::Command::cargo_bin("btpctl").unwrap();
    for var in [
        "BTP_URL",
        "BTP_SUBDOMAIN",
        "BTP_USER",
        "BTP_PASSWORD",
        "BTP_IDP",
        "BTP_SUBACCOUNT",
        "BTP_BIN",
        "BTPCTL_CONFIG",
        "BTPCTL_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("XDG_CONFIG_HOME", home.path()).env("HOME", home.path()).timeout(Duration::from_secs(60));
    Cli { cmd, _home: home }
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    /// Run against `fake` with a complete set of credentials.
    pub fn against(self, fake: &FakeBtp) -> Self {
        self.env("BTP_BIN", fake.path())
            .env("BTP_URL", "https://cli.btp.test")
            .env("BTP_SUBDOMAIN", "acme")
            .env("BTP_USER", "ops@acme.test")
            .env("BTP_PASSWORD", "s3cret")
            .env("BTP_SUBACCOUNT", "sub-1")
    }

    pub fn config_file(self, path: &Path) -> Self {
        self.env("BTPCTL_CONFIG", path)
    }

    pub fn passes(mut self) -> Output {
        let output = self.cmd.output().unwrap();
        let output = Output::from(output);
        assert_eq!(output.code, 0, "expected success\nstdout: {}\nstderr: {}", output.stdout, output.stderr);
        output
    }

    pub fn fails(mut self) -> Output {
        let output = Output::from(self.cmd.output().unwrap());
        assert_ne!(output.code, 0, "expected failure\nstdout: {}", output.stdout);
        output
    }
}

pub struct Output {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

impl From<std::process::Output> for Output {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code().unwrap_or(-1),
        }
    }
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn code_is(self, code: i32) -> Self {
        assert_eq!(self.code, code, "stderr: {}", self.stderr);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.stdout.trim()).unwrap()
    }
}
