// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted [`Executor`] for tests.

use crate::error::ExecError;
use crate::executor::{display_argv, ExecState, Executor};
use async_trait::async_trait;
use parking_lot::Mutex;
use regex::Regex;
use std::io::Write;
use std::sync::Arc;

/// What a fake run prints and how it exits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl FakeResponse {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self { stdout: stdout.into(), ..Self::default() }
    }

    /// Exit 1 with `stderr`, where the tool prints its `Response mapping`
    /// blocks.
    pub fn fail(stderr: impl Into<String>) -> Self {
        Self { stderr: stderr.into(), exit_code: 1, ..Self::default() }
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }
}

struct Rule {
    pattern: Regex,
    responses: Vec<FakeResponse>,
    served: usize,
}

impl Rule {
    fn next(&mut self) -> FakeResponse {
        let index = self.served.min(self.responses.len().saturating_sub(1));
        self.served += 1;
        self.responses.get(index).cloned().unwrap_or_default()
    }
}

#[derive(Default)]
struct FakeState {
    rules: Vec<Rule>,
    calls: Vec<Vec<String>>,
    exec: ExecState,
}

/// Executor that answers from regex-keyed scripted responses.
///
/// Rules match against the space-joined argument vector and the first
/// matching rule wins. A sequenced rule serves its responses in order and
/// then repeats the last one. Unmatched commands succeed with no output.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every command matching `pattern` with `response`.
    pub fn on(self, pattern: &str, response: FakeResponse) -> Self {
        self.on_sequence(pattern, vec![response])
    }

    /// Answer successive commands matching `pattern` with `responses`.
    #[allow(clippy::expect_used)]
    pub fn on_sequence(self, pattern: &str, responses: Vec<FakeResponse>) -> Self {
        let pattern = Regex::new(pattern).expect("fake rule pattern is valid");
        self.inner.lock().rules.push(Rule { pattern, responses, served: 0 });
        self
    }

    /// Every argument vector run so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.inner.lock().calls.clone()
    }

    /// Number of runs whose joined argument vector matches `pattern`.
    #[allow(clippy::expect_used)]
    pub fn count(&self, pattern: &str) -> usize {
        let pattern = Regex::new(pattern).expect("fake count pattern is valid");
        self.inner.lock().calls.iter().filter(|argv| pattern.is_match(&argv.join(" "))).count()
    }

    /// Stdin configured at the time of the latest run.
    pub fn stdin(&self) -> Option<Vec<u8>> {
        self.inner.lock().exec.stdin.clone()
    }
}

#[async_trait]
impl Executor for FakeExecutor {
    fn set_stdin(&self, input: Option<Vec<u8>>) {
        self.inner.lock().exec.stdin = input;
    }

    fn set_stdout(&self, sink: Option<Box<dyn Write + Send>>) {
        self.inner.lock().exec.set_sink(sink);
    }

    fn stdout_snapshot(&self) -> String {
        self.inner.lock().exec.capture.stdout_text()
    }

    fn stderr_snapshot(&self) -> String {
        self.inner.lock().exec.capture.stderr_text()
    }

    fn exit_code(&self) -> Option<i32> {
        self.inner.lock().exec.capture.exit_code
    }

    async fn run(&self, argv: &[String]) -> Result<(), ExecError> {
        if argv.is_empty() {
            return Err(ExecError::EmptyCommand);
        }
        let joined = argv.join(" ");

        let mut state = self.inner.lock();
        state.calls.push(argv.to_vec());
        let response = state
            .rules
            .iter_mut()
            .find(|rule| rule.pattern.is_match(&joined))
            .map(Rule::next)
            .unwrap_or_default();

        state.exec.begin();
        let stderr = response.stderr.trim().to_string();
        state.exec.finish(
            response.stdout.into_bytes(),
            response.stderr.into_bytes(),
            response.exit_code,
        );

        if response.exit_code == 0 {
            Ok(())
        } else {
            Err(ExecError::CommandFailed {
                command: display_argv(argv),
                exit_code: response.exit_code,
                stderr,
            })
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
