// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle poller: run a start command once, then poll a status check
//! until the resource reaches its terminal state.
//!
//! The loop per tick is: deadline check, retry-budget check, sleep, check.
//! Sleeping first gives the back-end time to begin work, and bounds the
//! number of checks at `ceil(timeout / poll_interval) + 1`.

use crate::error::ExecError;
use crate::executor::{display_argv, Executor};
use async_trait::async_trait;
use btp_core::CheckResponse;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::Instrument;

/// Consecutive failed checks tolerated after progress was observed.
pub const MAX_TRANSIENT_FAILURES: u32 = 3;

/// Re-establishes authentication for a check that detected it was logged
/// out.
#[async_trait]
pub trait Reauthenticate: Send + Sync {
    async fn login(&self) -> Result<(), ExecError>;
}

/// One read of the back-end.
///
/// Must be safe to call repeatedly. The poller never calls `login` itself;
/// it hands the handle to the check, which may re-authenticate and retry
/// internally.
#[async_trait]
pub trait StatusCheck: Send + Sync {
    async fn check(&self, login: &dyn Reauthenticate) -> CheckResponse;
}

/// What a failed check after observed progress does to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegressionPolicy {
    /// End the session on the first regression.
    #[default]
    FailFast,
    /// Keep polling until [`MAX_TRANSIENT_FAILURES`] consecutive failures.
    Tolerate,
}

btp_core::simple_display! {
    RegressionPolicy {
        FailFast => "fail-fast",
        Tolerate => "tolerate",
    }
}

/// Inputs to [`run_sync`].
pub struct RunSyncOptions<C, L> {
    pub start: Vec<String>,
    pub check: C,
    pub login: L,
    pub timeout: Duration,
    pub poll_interval: Duration,
    /// Poll even when the start command exits non-zero. Used by
    /// delete-then-verify flows where the delete may report a resource
    /// that is already gone.
    pub ignore_error_on_start: bool,
    pub regression: RegressionPolicy,
}

impl<C, L> RunSyncOptions<C, L> {
    pub fn new(
        start: Vec<String>,
        check: C,
        login: L,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            start,
            check,
            login,
            timeout,
            poll_interval,
            ignore_error_on_start: false,
            regression: RegressionPolicy::default(),
        }
    }

    btp_core::setters! {
        set { ignore_error_on_start: bool, regression: RegressionPolicy }
    }

    fn validate(&self) -> Result<(), PollError> {
        if self.start.is_empty() {
            return Err(PollError::InvalidOptions("start command is empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(PollError::InvalidOptions("timeout must be positive".to_string()));
        }
        if self.poll_interval.is_zero() {
            return Err(PollError::InvalidOptions("poll interval must be positive".to_string()));
        }
        Ok(())
    }
}

/// Terminal failures of a polling session.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("invalid polling options: {0}")]
    InvalidOptions(String),

    #[error("start command failed: {0}")]
    StartFailed(#[source] ExecError),

    #[error("timed out after {}s ({checks} checks)", .timeout.as_secs())]
    Timeout { timeout: Duration, checks: u32 },

    #[error("status check failed after progress was observed ({failures} failures)")]
    Regression { failures: u32 },

    #[error("status check failed {failures} times in a row after progress was observed")]
    RetryBudgetExhausted { failures: u32 },
}

/// Summary of a successful session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// Number of status checks performed.
    pub checks: u32,
    /// Time from the end of the start command to the terminal check.
    pub elapsed: Duration,
}

/// Run `options.start` once on `executor`, then poll `options.check`.
pub async fn run_sync<E, C, L>(
    executor: &E,
    options: RunSyncOptions<C, L>,
) -> Result<PollReport, PollError>
where
    E: Executor,
    C: StatusCheck,
    L: Reauthenticate,
{
    options.validate()?;

    let span = tracing::info_span!(
        "btp.run_sync",
        cmd = %display_argv(&options.start),
        timeout_s = options.timeout.as_secs(),
        poll_s = options.poll_interval.as_secs(),
        policy = %options.regression,
    );

    drive(executor, options).instrument(span).await
}

async fn drive<E, C, L>(
    executor: &E,
    options: RunSyncOptions<C, L>,
) -> Result<PollReport, PollError>
where
    E: Executor,
    C: StatusCheck,
    L: Reauthenticate,
{
    let RunSyncOptions {
        start,
        check,
        login,
        timeout,
        poll_interval,
        ignore_error_on_start,
        regression,
    } = options;

    if let Err(e) = executor.run(&start).await {
        if !ignore_error_on_start {
            tracing::warn!(error = %e, "start command failed");
            return Err(PollError::StartFailed(e));
        }
        tracing::info!(error = %e, "start command failed, polling anyway");
    }

    let started = Instant::now();
    let deadline = started + timeout;
    let mut waiting_for_ready = false;
    let mut transient_failures = 0u32;
    let mut checks = 0u32;

    loop {
        if Instant::now() >= deadline {
            tracing::warn!(checks, "polling timed out");
            return Err(PollError::Timeout { timeout, checks });
        }
        if transient_failures >= MAX_TRANSIENT_FAILURES {
            tracing::warn!(failures = transient_failures, "retry budget exhausted");
            return Err(PollError::RetryBudgetExhausted { failures: transient_failures });
        }

        tokio::time::sleep(poll_interval).await;

        let response = check.check(&login).await;
        checks += 1;
        tracing::debug!(checks, successful = response.successful, done = response.done, "check");

        match response {
            CheckResponse { successful: true, done: true } => {
                let elapsed = started.elapsed();
                tracing::info!(checks, elapsed_ms = elapsed.as_millis() as u64, "resource ready");
                return Ok(PollReport { checks, elapsed });
            }
            CheckResponse { successful: true, done: false } => {
                waiting_for_ready = true;
                transient_failures = 0;
            }
            CheckResponse { successful: false, .. } if waiting_for_ready => {
                transient_failures += 1;
                tracing::warn!(failures = transient_failures, "check regressed after progress");
                if regression == RegressionPolicy::FailFast {
                    return Err(PollError::Regression { failures: transient_failures });
                }
            }
            CheckResponse { successful: false, .. } => {}
        }
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
