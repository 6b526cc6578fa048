// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument-vector builder for the `btp` CLI.
//!
//! The emitted vector has the shape
//!
//! ```text
//! <tool> [global-option ...] <action> [<target>] [--flag value ...] [--switch]
//! ```
//!
//! Values are never quoted or escaped: the vector is handed to the process
//! spawner as-is, without a shell in between.

use thiserror::Error;

/// Default executable name for the BTP CLI.
pub const BTP_TOOL: &str = "btp";

/// Errors from [`CommandBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("action is required")]
    MissingAction,
}

/// Fluent accumulator for a single CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    tool: String,
    options: Vec<String>,
    action: String,
    target: String,
    params: Vec<String>,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new(BTP_TOOL)
    }
}

impl CommandBuilder {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            options: Vec::new(),
            action: String::new(),
            target: String::new(),
            params: Vec::new(),
        }
    }

    /// Drop everything accumulated so far. The tool name is kept.
    pub fn reset(mut self) -> Self {
        self.options.clear();
        self.action.clear();
        self.target.clear();
        self.params.clear();
        self
    }

    /// Append a global option (placed between the tool name and the action).
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Set the action token, replacing any previous one.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Set the target token (e.g. `services/instance`).
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Append a free-form trailing token.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Append a `name value` flag pair.
    pub fn flag(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.push(name.to_string());
        self.params.push(value.into());
        self
    }

    crate::flags! {
        value {
            subaccount => "--subaccount",
            labels_filter => "--labels-filter",
            fields_filter => "--fields-filter",
            id => "--id",
            name => "--name",
            data_center => "--data-center",
            service => "--service",
            /// Service plan by id.
            plan_id => "--plan",
            plan_name => "--plan-name",
            offering_name => "--offering-name",
            /// JSON blob or path to a JSON file.
            parameters => "--parameters",
            /// JSON blob.
            labels => "--labels",
            binding_name => "--binding",
            service_instance_name => "--instance-name",
            service_instance_id => "--service-instance",
            url => "--url",
            subdomain => "--subdomain",
            user => "--user",
            password => "--password",
            format => "--format",
            identity_provider => "--idp",
        }
        switch {
            show_parameters => "--show-parameters",
            set_confirm => "--confirm",
        }
    }

    /// Presence-only `--confirm`.
    pub fn confirm(self) -> Self {
        self.with_param("--confirm")
    }

    pub fn verbose(self) -> Self {
        self.flag("--verbose", "true")
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn target(&self) -> Option<&str> {
        (!self.target.is_empty()).then_some(self.target.as_str())
    }

    /// Emit `[tool, *options, action, target?, *params]`.
    pub fn build(&self) -> Result<Vec<String>, BuildError> {
        if self.action.is_empty() {
            return Err(BuildError::MissingAction);
        }

        let mut argv = Vec::with_capacity(3 + self.options.len() + self.params.len());
        argv.push(self.tool.clone());
        argv.extend(self.options.iter().cloned());
        argv.push(self.action.clone());
        if !self.target.is_empty() {
            argv.push(self.target.clone());
        }
        argv.extend(self.params.iter().cloned());
        Ok(argv)
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
