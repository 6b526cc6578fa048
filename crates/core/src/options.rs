// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-supplied options for each service operation.
//!
//! Every options struct validates itself before anything is spawned. A
//! failed validation lists every missing field at once, in declaration
//! order.

use std::time::Duration;
use thiserror::Error;

/// One or more required fields were empty or zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parameters missing, please provide {}", .fields.join(", "))]
pub struct MissingParameters {
    pub fields: Vec<&'static str>,
}

/// Accumulates missing field names.
#[derive(Default)]
struct Required(Vec<&'static str>);

impl Required {
    fn text(mut self, field: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.0.push(field);
        }
        self
    }

    fn duration(mut self, field: &'static str, value: Duration) -> Self {
        if value.is_zero() {
            self.0.push(field);
        }
        self
    }

    fn login(self, login: &LoginOptions) -> Self {
        self.text("Url", &login.url)
            .text("Subdomain", &login.subdomain)
            .text("User", &login.user)
            .text("Password", &login.password)
    }

    fn finish(self) -> Result<(), MissingParameters> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(MissingParameters { fields: self.0 })
        }
    }
}

/// Credentials and endpoint for `btp login`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginOptions {
    pub url: String,
    pub subdomain: String,
    pub user: String,
    pub password: String,
    /// Custom identity provider (`--idp`).
    pub idp: Option<String>,
}

impl LoginOptions {
    crate::setters! {
        into { url: String, subdomain: String, user: String, password: String }
        set { idp: Option<String> }
    }

    pub fn validate(&self) -> Result<(), MissingParameters> {
        Required::default().login(self).finish()
    }
}

impl std::fmt::Debug for LoginOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginOptions")
            .field("url", &self.url)
            .field("subdomain", &self.subdomain)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("idp", &self.idp)
            .finish()
    }
}

/// Timeout and poll interval for operations that wait on the back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Polling {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Polling {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self { timeout, poll_interval }
    }

    fn require(&self, required: Required) -> Required {
        required.duration("Timeout", self.timeout).duration("PollInterval", self.poll_interval)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateInstanceOptions {
    pub login: LoginOptions,
    pub subaccount: String,
    pub instance_name: String,
    pub plan_name: String,
    pub offering_name: String,
    /// JSON blob passed through `--parameters`.
    pub parameters: Option<String>,
    pub polling: Polling,
}

impl CreateInstanceOptions {
    pub fn validate(&self) -> Result<(), MissingParameters> {
        let required = Required::default()
            .login(&self.login)
            .text("Subaccount", &self.subaccount)
            .text("InstanceName", &self.instance_name)
            .text("PlanName", &self.plan_name)
            .text("OfferingName", &self.offering_name);
        self.polling.require(required).finish()
    }

    /// The read used to verify the instance is ready.
    pub fn get(&self) -> GetInstanceOptions {
        GetInstanceOptions {
            login: self.login.clone(),
            subaccount: self.subaccount.clone(),
            instance_name: self.instance_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetInstanceOptions {
    pub login: LoginOptions,
    pub subaccount: String,
    pub instance_name: String,
}

impl GetInstanceOptions {
    pub fn validate(&self) -> Result<(), MissingParameters> {
        Required::default()
            .login(&self.login)
            .text("Subaccount", &self.subaccount)
            .text("InstanceName", &self.instance_name)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteInstanceOptions {
    pub login: LoginOptions,
    pub subaccount: String,
    pub instance_name: String,
    pub polling: Polling,
}

impl DeleteInstanceOptions {
    pub fn validate(&self) -> Result<(), MissingParameters> {
        let required = Required::default()
            .login(&self.login)
            .text("Subaccount", &self.subaccount)
            .text("InstanceName", &self.instance_name);
        self.polling.require(required).finish()
    }

    /// The read used to verify the instance is gone.
    pub fn get(&self) -> GetInstanceOptions {
        GetInstanceOptions {
            login: self.login.clone(),
            subaccount: self.subaccount.clone(),
            instance_name: self.instance_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateBindingOptions {
    pub login: LoginOptions,
    pub subaccount: String,
    pub binding_name: String,
    /// Name of the instance the binding belongs to.
    pub service_instance_name: String,
    pub parameters: Option<String>,
    pub polling: Polling,
}

impl CreateBindingOptions {
    pub fn validate(&self) -> Result<(), MissingParameters> {
        let required = Required::default()
            .login(&self.login)
            .text("Subaccount", &self.subaccount)
            .text("BindingName", &self.binding_name)
            .text("ServiceInstanceName", &self.service_instance_name);
        self.polling.require(required).finish()
    }

    pub fn get(&self) -> GetBindingOptions {
        GetBindingOptions {
            login: self.login.clone(),
            subaccount: self.subaccount.clone(),
            binding_name: self.binding_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetBindingOptions {
    pub login: LoginOptions,
    pub subaccount: String,
    pub binding_name: String,
}

impl GetBindingOptions {
    pub fn validate(&self) -> Result<(), MissingParameters> {
        Required::default()
            .login(&self.login)
            .text("Subaccount", &self.subaccount)
            .text("BindingName", &self.binding_name)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteBindingOptions {
    pub login: LoginOptions,
    pub subaccount: String,
    pub binding_name: String,
    pub polling: Polling,
}

impl DeleteBindingOptions {
    pub fn validate(&self) -> Result<(), MissingParameters> {
        let required = Required::default()
            .login(&self.login)
            .text("Subaccount", &self.subaccount)
            .text("BindingName", &self.binding_name);
        self.polling.require(required).finish()
    }

    pub fn get(&self) -> GetBindingOptions {
        GetBindingOptions {
            login: self.login.clone(),
            subaccount: self.subaccount.clone(),
            binding_name: self.binding_name.clone(),
        }
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
