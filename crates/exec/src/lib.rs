// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! btp-exec: process execution and lifecycle polling for the BTP CLI.

mod error;
mod executor;
pub mod poll;
mod process;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use error::ExecError;
pub use executor::{display_argv, Capture, Executor, SharedBuffer, NO_EXIT_CODE};
pub use poll::{
    run_sync, PollError, PollReport, Reauthenticate, RegressionPolicy, RunSyncOptions,
    StatusCheck, MAX_TRANSIENT_FAILURES,
};
pub use process::ProcessExecutor;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeExecutor, FakeResponse};
