// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status checks handed to the poller.
//!
//! Each tick runs one `get`. A failure whose output cannot be classified is
//! treated as a possibly expired session: the check logs in again and
//! repeats the read once within the same tick.

use crate::client::BtpClient;
use async_trait::async_trait;
use btp_core::{CheckResponse, ErrorCode, PayloadError, ServiceBinding, ServiceInstance};
use btp_exec::{display_argv, Executor, Reauthenticate, StatusCheck};

/// Kind of record a `get` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Instance,
    Binding,
}

impl Resource {
    fn is_ready(self, text: &str) -> Result<bool, PayloadError> {
        match self {
            Resource::Instance => ServiceInstance::parse(text).map(|r| r.ready),
            Resource::Binding => ServiceBinding::parse(text).map(|r| r.ready),
        }
    }

    /// Error code that proves the resource no longer exists.
    pub fn not_found(self) -> ErrorCode {
        match self {
            Resource::Instance => ErrorCode::ServiceInstanceNotFound,
            Resource::Binding => ErrorCode::ServiceBindingNotFound,
        }
    }
}

btp_core::simple_display! {
    Resource {
        Instance => "service instance",
        Binding => "service binding",
    }
}

enum Read {
    Found(String),
    Failed(ErrorCode),
}

/// Runs one `get` argument vector on the client's executor.
struct Reader<E: Executor> {
    client: BtpClient<E>,
    argv: Vec<String>,
}

impl<E: Executor> Reader<E> {
    async fn read(&self) -> Read {
        match self.client.executor.run(&self.argv).await {
            Ok(()) => Read::Found(self.client.executor.stdout_snapshot()),
            Err(e) => {
                let code = self.client.last_error_code();
                tracing::debug!(cmd = %display_argv(&self.argv), error = %e, %code, "read failed");
                Read::Failed(code)
            }
        }
    }

    async fn read_with_reauth(&self, login: &dyn Reauthenticate) -> Read {
        match self.read().await {
            Read::Failed(ErrorCode::Unclassified) => {
                if let Err(e) = login.login().await {
                    tracing::warn!(error = %e, "re-authentication failed");
                    return Read::Failed(ErrorCode::Unclassified);
                }
                self.read().await
            }
            read => read,
        }
    }
}

/// Done once the resource exists and reports `ready: true`.
pub struct ReadyCheck<E: Executor> {
    reader: Reader<E>,
    resource: Resource,
}

impl<E: Executor> ReadyCheck<E> {
    pub fn new(client: BtpClient<E>, get: Vec<String>, resource: Resource) -> Self {
        Self { reader: Reader { client, argv: get }, resource }
    }
}

#[async_trait]
impl<E: Executor> StatusCheck for ReadyCheck<E> {
    async fn check(&self, login: &dyn Reauthenticate) -> CheckResponse {
        match self.reader.read_with_reauth(login).await {
            Read::Found(text) => match self.resource.is_ready(&text) {
                Ok(true) => CheckResponse::done(),
                Ok(false) => CheckResponse::pending(),
                Err(e) => {
                    tracing::warn!(resource = %self.resource, error = %e, "unreadable record");
                    CheckResponse::failed()
                }
            },
            Read::Failed(_) => CheckResponse::failed(),
        }
    }
}

/// Done once `get` fails with the resource's not-found code.
pub struct GoneCheck<E: Executor> {
    reader: Reader<E>,
    resource: Resource,
}

impl<E: Executor> GoneCheck<E> {
    pub fn new(client: BtpClient<E>, get: Vec<String>, resource: Resource) -> Self {
        Self { reader: Reader { client, argv: get }, resource }
    }
}

#[async_trait]
impl<E: Executor> StatusCheck for GoneCheck<E> {
    async fn check(&self, login: &dyn Reauthenticate) -> CheckResponse {
        match self.reader.read_with_reauth(login).await {
            Read::Found(_) => CheckResponse::pending(),
            Read::Failed(code) if code == self.resource.not_found() => CheckResponse::done(),
            Read::Failed(code) => {
                tracing::debug!(resource = %self.resource, %code, "unexpected failure while deleting");
                CheckResponse::failed()
            }
        }
    }
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
