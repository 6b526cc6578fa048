// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use btp_exec::{ExecError, FakeExecutor, FakeResponse};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

const GET: &str = "btp --format json get services/instance --name test_instance --subaccount yyy";
const INSTANCE_GONE: &str = "Response mapping: {\"error\": \"NotFound\", \"description\": \"could not find such instance\"}";
const BINDING_GONE: &str = "Response mapping: {\"error\": \"NotFound\", \"description\": \"could not find such binding\"}";

fn argv(line: &str) -> Vec<String> {
    line.split(' ').map(str::to_string).collect()
}

/// Login that only counts calls.
#[derive(Clone, Default)]
struct CountingLogin(Arc<AtomicU32>);

#[async_trait]
impl Reauthenticate for CountingLogin {
    async fn login(&self) -> Result<(), ExecError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl CountingLogin {
    fn count(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

fn ready_check(exec: &FakeExecutor, resource: Resource) -> ReadyCheck<FakeExecutor> {
    ReadyCheck::new(BtpClient::new(exec.clone()), argv(GET), resource)
}

fn gone_check(exec: &FakeExecutor, resource: Resource) -> GoneCheck<FakeExecutor> {
    GoneCheck::new(BtpClient::new(exec.clone()), argv(GET), resource)
}

#[yare::parameterized(
    ready_compact  = { "{\"ready\":true}", CheckResponse::done() },
    ready_pretty   = { "{\n  \"ready\": true,\n  \"name\": \"test_instance\"\n}\n", CheckResponse::done() },
    not_ready      = { "{\"ready\":false}", CheckResponse::pending() },
    ready_missing  = { "{\"name\":\"test_instance\"}", CheckResponse::pending() },
    yaml_ready     = { "ready: true\nname: test_instance\n\nOK\n", CheckResponse::done() },
    status_only    = { "OK\n", CheckResponse::failed() },
)]
fn ready_check_reads_record(stdout: &str, expected: CheckResponse) {
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let exec = FakeExecutor::new().on("get", FakeResponse::ok(stdout));
    let check = ready_check(&exec, Resource::Instance);

    let got = runtime.block_on(check.check(&CountingLogin::default()));
    assert_eq!(got, expected);
}

#[tokio::test]
async fn ready_check_fails_on_classified_error_without_relogin() {
    let exec = FakeExecutor::new().on("get", FakeResponse::fail(INSTANCE_GONE));
    let login = CountingLogin::default();

    let got = ready_check(&exec, Resource::Instance).check(&login).await;

    assert_eq!(got, CheckResponse::failed());
    assert_eq!(login.count(), 0);
    assert_eq!(exec.count("get"), 1);
}

#[tokio::test]
async fn unclassified_failure_relogs_and_retries_once() {
    let exec = FakeExecutor::new().on_sequence(
        "get",
        vec![FakeResponse::fail("token expired"), FakeResponse::ok("{\"ready\":true}")],
    );
    let login = CountingLogin::default();

    let got = ready_check(&exec, Resource::Instance).check(&login).await;

    assert_eq!(got, CheckResponse::done());
    assert_eq!(login.count(), 1);
    assert_eq!(exec.count("get"), 2);
}

#[tokio::test]
async fn retry_after_relogin_is_not_repeated() {
    let exec = FakeExecutor::new().on("get", FakeResponse::fail("token expired"));
    let login = CountingLogin::default();

    let got = ready_check(&exec, Resource::Binding).check(&login).await;

    assert_eq!(got, CheckResponse::failed());
    assert_eq!(login.count(), 1);
    assert_eq!(exec.count("get"), 2);
}

#[tokio::test]
async fn gone_check_pending_while_resource_exists() {
    let exec = FakeExecutor::new().on("get", FakeResponse::ok("{\"ready\":true}"));
    let got = gone_check(&exec, Resource::Instance).check(&CountingLogin::default()).await;
    assert_eq!(got, CheckResponse::pending());
}

#[tokio::test]
async fn gone_check_done_on_matching_not_found() {
    let exec = FakeExecutor::new().on("get", FakeResponse::fail(INSTANCE_GONE));
    let got = gone_check(&exec, Resource::Instance).check(&CountingLogin::default()).await;
    assert_eq!(got, CheckResponse::done());
}

#[tokio::test]
async fn gone_check_rejects_other_resource_not_found() {
    let exec = FakeExecutor::new().on("get", FakeResponse::fail(BINDING_GONE));
    let got = gone_check(&exec, Resource::Instance).check(&CountingLogin::default()).await;
    assert_eq!(got, CheckResponse::failed());
}

#[tokio::test]
async fn gone_check_for_binding() {
    let exec = FakeExecutor::new().on("get", FakeResponse::fail(BINDING_GONE));
    let got = gone_check(&exec, Resource::Binding).check(&CountingLogin::default()).await;
    assert_eq!(got, CheckResponse::done());
}

#[test]
fn resource_not_found_codes() {
    assert_eq!(Resource::Instance.not_found(), ErrorCode::ServiceInstanceNotFound);
    assert_eq!(Resource::Binding.not_found(), ErrorCode::ServiceBindingNotFound);
    assert_eq!(Resource::Binding.to_string(), "service binding");
}
