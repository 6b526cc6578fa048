// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The [`Executor`] seam and the capture state shared by its
//! implementations.

use crate::error::ExecError;
use crate::poll::{self, PollError, PollReport, Reauthenticate, RunSyncOptions, StatusCheck};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Runs one argument vector at a time and keeps what it printed.
///
/// Implementations hold their state behind a shared lock, so a clone
/// observes the same capture. A run never holds that lock across an await.
#[async_trait]
pub trait Executor: Clone + Send + Sync + 'static {
    /// Bytes fed to the next runs' stdin. `None` closes stdin immediately.
    fn set_stdin(&self, input: Option<Vec<u8>>);

    /// Extra destination for stdout, written after each run in addition to
    /// the internal buffer.
    fn set_stdout(&self, sink: Option<Box<dyn Write + Send>>);

    /// Stdout of the most recent run.
    fn stdout_snapshot(&self) -> String;

    /// Stderr of the most recent run.
    fn stderr_snapshot(&self) -> String;

    /// Exit status of the most recent run, once it has completed.
    fn exit_code(&self) -> Option<i32>;

    /// Run `argv` to completion. Non-zero exit is an error; the capture is
    /// still readable afterwards.
    async fn run(&self, argv: &[String]) -> Result<(), ExecError>;

    /// Run a start command once, then poll until done.
    async fn run_sync<C, L>(&self, options: RunSyncOptions<C, L>) -> Result<PollReport, PollError>
    where
        C: StatusCheck,
        L: Reauthenticate,
    {
        poll::run_sync(self, options).await
    }
}

/// Exit status recorded when a process was killed by a signal or never ran
/// to completion.
pub const NO_EXIT_CODE: i32 = -1;

/// Output of the most recent run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capture {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<i32>,
}

impl Capture {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Streams and capture for one executor.
#[derive(Default)]
pub(crate) struct ExecState {
    pub(crate) stdin: Option<Vec<u8>>,
    sink: Option<Box<dyn Write + Send>>,
    pub(crate) capture: Capture,
}

impl ExecState {
    pub(crate) fn set_sink(&mut self, sink: Option<Box<dyn Write + Send>>) {
        self.sink = sink;
    }

    /// Forget the previous run.
    pub(crate) fn begin(&mut self) {
        self.capture = Capture::default();
    }

    /// The process could not be run to completion. Output read so far is
    /// dropped and the exit status becomes [`NO_EXIT_CODE`].
    pub(crate) fn abort(&mut self) {
        self.capture = Capture { exit_code: Some(NO_EXIT_CODE), ..Capture::default() };
    }

    pub(crate) fn finish(&mut self, stdout: Vec<u8>, stderr: Vec<u8>, exit_code: i32) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.write_all(&stdout).and_then(|()| sink.flush()) {
                tracing::warn!(error = %e, "failed to copy stdout to sink");
            }
        }
        self.capture = Capture { stdout, stderr, exit_code: Some(exit_code) };
    }
}

/// Clone-able in-memory sink for [`Executor::set_stdout`].
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Render an argument vector for logs and error messages, hiding the value
/// that follows `--password`.
pub fn display_argv(argv: &[String]) -> String {
    let mut out = Vec::with_capacity(argv.len());
    let mut hide_next = false;
    for arg in argv {
        if hide_next {
            out.push("****");
            hide_next = false;
            continue;
        }
        hide_next = arg == "--password";
        out.push(arg.as_str());
    }
    out.join(" ")
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
