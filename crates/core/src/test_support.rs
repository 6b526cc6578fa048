// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::options::{
    CreateBindingOptions, CreateInstanceOptions, DeleteBindingOptions, DeleteInstanceOptions,
    GetBindingOptions, GetInstanceOptions, LoginOptions, Polling,
};
use std::time::Duration;

pub const SUBACCOUNT: &str = "yyy";

pub fn login() -> LoginOptions {
    LoginOptions::default()
        .url("https://api.endpoint.com")
        .subdomain("xxx")
        .user("test_user")
        .password("test_password")
}

pub fn polling() -> Polling {
    Polling::new(Duration::from_secs(30), Duration::from_secs(1))
}

pub fn create_instance(name: &str) -> CreateInstanceOptions {
    CreateInstanceOptions {
        login: login(),
        subaccount: SUBACCOUNT.to_string(),
        instance_name: name.to_string(),
        plan_name: "p".to_string(),
        offering_name: "o".to_string(),
        parameters: None,
        polling: polling(),
    }
}

pub fn get_instance(name: &str) -> GetInstanceOptions {
    create_instance(name).get()
}

pub fn delete_instance(name: &str) -> DeleteInstanceOptions {
    DeleteInstanceOptions {
        login: login(),
        subaccount: SUBACCOUNT.to_string(),
        instance_name: name.to_string(),
        polling: polling(),
    }
}

pub fn create_binding(name: &str, instance: &str) -> CreateBindingOptions {
    CreateBindingOptions {
        login: login(),
        subaccount: SUBACCOUNT.to_string(),
        binding_name: name.to_string(),
        service_instance_name: instance.to_string(),
        parameters: None,
        polling: polling(),
    }
}

pub fn get_binding(name: &str) -> GetBindingOptions {
    create_binding(name, "instance").get()
}

pub fn delete_binding(name: &str) -> DeleteBindingOptions {
    DeleteBindingOptions {
        login: login(),
        subaccount: SUBACCOUNT.to_string(),
        binding_name: name.to_string(),
        polling: polling(),
    }
}
