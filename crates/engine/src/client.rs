// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session handling around one [`Executor`].
//!
//! Every operation runs as login, work, logout. Logout is attempted even
//! when the work failed; in that case a logout failure is only logged and
//! the work's error is returned.

use crate::error::{Operation, ServiceError};
use async_trait::async_trait;
use btp_core::{get_error_info, CommandBuilder, ErrorCode, LoginOptions, BTP_TOOL};
use btp_exec::{ExecError, Executor, PollError, Reauthenticate, RegressionPolicy};
use std::future::Future;

/// Target token for service instances.
pub const INSTANCE_TARGET: &str = "services/instance";
/// Target token for service bindings.
pub const BINDING_TARGET: &str = "services/binding";

#[derive(Clone)]
pub struct BtpClient<E: Executor> {
    pub(crate) executor: E,
    tool: String,
    pub(crate) regression: RegressionPolicy,
}

impl<E: Executor> BtpClient<E> {
    pub fn new(executor: E) -> Self {
        Self { executor, tool: BTP_TOOL.to_string(), regression: RegressionPolicy::default() }
    }

    /// Name placed in `argv[0]`.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// How polling sessions treat a failed check after progress.
    pub fn with_regression(mut self, policy: RegressionPolicy) -> Self {
        self.regression = policy;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Builder prefilled with the tool name and `--format json`.
    pub fn command(&self) -> CommandBuilder {
        CommandBuilder::new(&self.tool).with_option("--format").with_option("json")
    }

    /// Make JSON the tool's default output format.
    pub async fn configure_output(&self) -> Result<(), ServiceError> {
        let operation = Operation::ConfigureOutput;
        let argv = CommandBuilder::new(&self.tool)
            .with_action("set")
            .with_target("config")
            .format("json")
            .build()
            .map_err(|source| ServiceError::Build { operation, source })?;
        self.executor.run(&argv).await.map_err(|source| self.exec_error(operation, source))
    }

    pub async fn login(&self, options: &LoginOptions) -> Result<(), ServiceError> {
        let argv = self.login_argv(options)?;
        self.executor.run(&argv).await.map_err(ServiceError::Login)?;
        tracing::debug!(url = %options.url, subdomain = %options.subdomain, "logged in");
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ServiceError> {
        let argv = self
            .command()
            .with_action("logout")
            .build()
            .map_err(|source| ServiceError::Build { operation: Operation::Logout, source })?;
        self.executor.run(&argv).await.map_err(ServiceError::Logout)
    }

    /// Login, run `work`, then logout.
    pub(crate) async fn session<T, F>(
        &self,
        login: &LoginOptions,
        work: F,
    ) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        self.login(login).await?;
        let result = work.await;

        match (result, self.logout().await) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(logout)) => {
                tracing::warn!(error = %logout, "logout after failed operation also failed");
                Err(e)
            }
        }
    }

    /// `btp --format json login ...` for `options`.
    pub(crate) fn login_argv(&self, options: &LoginOptions) -> Result<Vec<String>, ServiceError> {
        let builder = self
            .command()
            .with_action("login")
            .url(&options.url)
            .subdomain(&options.subdomain)
            .user(&options.user)
            .password(&options.password);
        let builder = match &options.idp {
            Some(idp) => builder.identity_provider(idp),
            None => builder,
        };
        builder.build().map_err(|source| ServiceError::Build { operation: Operation::Login, source })
    }

    /// Classify whatever the last run printed.
    pub(crate) fn last_error_code(&self) -> ErrorCode {
        let text = format!("{}\n{}", self.executor.stdout_snapshot(), self.executor.stderr_snapshot());
        get_error_info(&text).map(|(_, code)| code).unwrap_or(ErrorCode::Unclassified)
    }

    pub(crate) fn exec_error(&self, operation: Operation, source: ExecError) -> ServiceError {
        ServiceError::Exec { operation, source, code: self.last_error_code() }
    }

    /// A failed start command is the last run, so its output is still captured.
    pub(crate) fn poll_error(&self, operation: Operation, source: PollError) -> ServiceError {
        let code = match &source {
            PollError::StartFailed(_) => self.last_error_code(),
            _ => ErrorCode::Unclassified,
        };
        ServiceError::Poll { operation, source, code }
    }
}

/// Re-runs the session's `btp login`.
pub struct SessionLogin<E: Executor> {
    executor: E,
    argv: Vec<String>,
}

impl<E: Executor> SessionLogin<E> {
    pub fn new(client: &BtpClient<E>, options: &LoginOptions) -> Result<Self, ServiceError> {
        Ok(Self { executor: client.executor.clone(), argv: client.login_argv(options)? })
    }
}

#[async_trait]
impl<E: Executor> Reauthenticate for SessionLogin<E> {
    async fn login(&self) -> Result<(), ExecError> {
        tracing::info!("re-authenticating");
        self.executor.run(&self.argv).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
