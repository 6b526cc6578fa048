// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`Executor`] backed by real subprocesses.

use crate::error::ExecError;
use crate::executor::{display_argv, ExecState, Executor, NO_EXIT_CODE};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::ffi::OsString;
use std::io::Write;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tracing::Instrument;

/// Spawns each argument vector with `tokio::process`.
///
/// `argv[0]` names the program unless [`ProcessExecutor::with_program`]
/// overrides it, which lets callers keep `btp` in argument vectors while
/// running a binary from elsewhere.
#[derive(Clone, Default)]
pub struct ProcessExecutor {
    program: Option<OsString>,
    env: Vec<(OsString, OsString)>,
    state: Arc<Mutex<ExecState>>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = Some(program.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    async fn spawn(&self, name: &str, args: &[String], command: String) -> Result<(), ExecError> {
        let stdin_data = {
            let mut state = self.state.lock();
            state.begin();
            state.stdin.clone()
        };

        let program = self.program.clone().unwrap_or_else(|| OsString::from(name));
        let mut process = tokio::process::Command::new(&program);
        process.args(args);
        process.envs(self.env.iter().map(|(k, v)| (k, v)));
        process.stdin(if stdin_data.is_some() { Stdio::piped() } else { Stdio::null() });
        process.stdout(Stdio::piped());
        process.stderr(Stdio::piped());
        process.kill_on_drop(true);

        let start = Instant::now();
        let mut child = process
            .spawn()
            .map_err(|source| {
                self.aborted(ExecError::SpawnFailed { command: command.clone(), source })
            })?;

        if let Some(data) = stdin_data {
            if let Some(mut stdin) = child.stdin.take() {
                let write_result = stdin.write_all(&data).await;
                drop(stdin); // close pipe to signal EOF
                write_result
                    .map_err(|source| {
                        self.aborted(ExecError::Stdin { command: command.clone(), source })
                    })?;
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| {
                self.aborted(ExecError::SpawnFailed { command: command.clone(), source })
            })?;

        let exit_code = output.status.code().unwrap_or(NO_EXIT_CODE);
        let current = tracing::Span::current();
        current.record("exit_code", exit_code);
        current.record("duration_ms", start.elapsed().as_millis() as u64);

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        self.state.lock().finish(output.stdout, output.stderr, exit_code);

        if output.status.success() {
            tracing::debug!("command succeeded");
            Ok(())
        } else {
            tracing::debug!(%stderr, "command failed");
            Err(ExecError::CommandFailed { command, exit_code, stderr })
        }
    }

    fn aborted(&self, err: ExecError) -> ExecError {
        tracing::Span::current().record("exit_code", NO_EXIT_CODE);
        self.state.lock().abort();
        err
    }
}

#[async_trait]
impl Executor for ProcessExecutor {
    fn set_stdin(&self, input: Option<Vec<u8>>) {
        self.state.lock().stdin = input;
    }

    fn set_stdout(&self, sink: Option<Box<dyn Write + Send>>) {
        self.state.lock().set_sink(sink);
    }

    fn stdout_snapshot(&self) -> String {
        self.state.lock().capture.stdout_text()
    }

    fn stderr_snapshot(&self) -> String {
        self.state.lock().capture.stderr_text()
    }

    fn exit_code(&self) -> Option<i32> {
        self.state.lock().capture.exit_code
    }

    async fn run(&self, argv: &[String]) -> Result<(), ExecError> {
        let (name, args) = argv.split_first().ok_or(ExecError::EmptyCommand)?;
        let command = display_argv(argv);

        let span = tracing::info_span!(
            "btp.exec",
            cmd = %command,
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        self.spawn(name, args, command).instrument(span).await
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
