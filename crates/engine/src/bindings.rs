// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service binding operations.

use crate::checks::{GoneCheck, ReadyCheck, Resource};
use crate::client::{BtpClient, SessionLogin, BINDING_TARGET};
use crate::error::{Operation, ServiceError};
use btp_core::{to_json, CreateBindingOptions, DeleteBindingOptions, GetBindingOptions};
use btp_exec::{Executor, RunSyncOptions};
use tracing::Instrument;

impl<E: Executor> BtpClient<E> {
    /// Create a binding for an existing instance and wait until its
    /// credentials are ready. Returns the binding record as a single JSON
    /// line.
    pub async fn create_service_binding(
        &self,
        options: &CreateBindingOptions,
    ) -> Result<String, ServiceError> {
        let operation = Operation::CreateBinding;
        options.validate().map_err(|source| ServiceError::MissingParameters { operation, source })?;

        let span = tracing::info_span!(
            "btp.create_binding",
            subaccount = %options.subaccount,
            name = %options.binding_name,
            instance = %options.service_instance_name,
        );
        self.session(&options.login, self.create_binding_inner(options)).instrument(span).await
    }

    async fn create_binding_inner(
        &self,
        options: &CreateBindingOptions,
    ) -> Result<String, ServiceError> {
        let operation = Operation::CreateBinding;
        let start = self
            .command()
            .with_action("create")
            .with_target(BINDING_TARGET)
            .name(&options.binding_name)
            .service_instance_name(&options.service_instance_name)
            .subaccount(&options.subaccount);
        let start = match &options.parameters {
            Some(parameters) => start.parameters(parameters),
            None => start,
        };
        let start = start.build().map_err(|source| ServiceError::Build { operation, source })?;

        let get = self.get_binding_argv(&options.get(), operation)?;
        let run = RunSyncOptions::new(
            start,
            ReadyCheck::new(self.clone(), get, Resource::Binding),
            SessionLogin::new(self, &options.login)?,
            options.polling.timeout,
            options.polling.poll_interval,
        )
        .regression(self.regression);

        self.executor
            .run_sync(run)
            .await
            .map_err(|source| self.poll_error(operation, source))?;

        to_json(&self.executor.stdout_snapshot())
            .map_err(|source| ServiceError::Payload { operation, source })
    }

    /// Read a binding. Returns the record as a single JSON line.
    pub async fn get_service_binding(
        &self,
        options: &GetBindingOptions,
    ) -> Result<String, ServiceError> {
        let operation = Operation::GetBinding;
        options.validate().map_err(|source| ServiceError::MissingParameters { operation, source })?;

        let span = tracing::info_span!(
            "btp.get_binding",
            subaccount = %options.subaccount,
            name = %options.binding_name,
        );
        self.session(&options.login, self.get_binding_inner(options)).instrument(span).await
    }

    async fn get_binding_inner(&self, options: &GetBindingOptions) -> Result<String, ServiceError> {
        let operation = Operation::GetBinding;
        let argv = self.get_binding_argv(options, operation)?;
        self.executor.run(&argv).await.map_err(|source| self.exec_error(operation, source))?;
        to_json(&self.executor.stdout_snapshot())
            .map_err(|source| ServiceError::Payload { operation, source })
    }

    /// Delete a binding and wait until reading it reports not-found.
    pub async fn delete_service_binding(
        &self,
        options: &DeleteBindingOptions,
    ) -> Result<(), ServiceError> {
        let operation = Operation::DeleteBinding;
        options.validate().map_err(|source| ServiceError::MissingParameters { operation, source })?;

        let span = tracing::info_span!(
            "btp.delete_binding",
            subaccount = %options.subaccount,
            name = %options.binding_name,
        );
        self.session(&options.login, self.delete_binding_inner(options)).instrument(span).await
    }

    async fn delete_binding_inner(&self, options: &DeleteBindingOptions) -> Result<(), ServiceError> {
        let operation = Operation::DeleteBinding;
        let start = self
            .command()
            .with_action("delete")
            .with_target(BINDING_TARGET)
            .name(&options.binding_name)
            .subaccount(&options.subaccount)
            .confirm()
            .build()
            .map_err(|source| ServiceError::Build { operation, source })?;

        let get = self.get_binding_argv(&options.get(), operation)?;
        let run = RunSyncOptions::new(
            start,
            GoneCheck::new(self.clone(), get, Resource::Binding),
            SessionLogin::new(self, &options.login)?,
            options.polling.timeout,
            options.polling.poll_interval,
        )
        .ignore_error_on_start(true)
        .regression(self.regression);

        self.executor
            .run_sync(run)
            .await
            .map_err(|source| self.poll_error(operation, source))?;
        Ok(())
    }

    fn get_binding_argv(
        &self,
        options: &GetBindingOptions,
        operation: Operation,
    ) -> Result<Vec<String>, ServiceError> {
        self.command()
            .with_action("get")
            .with_target(BINDING_TARGET)
            .name(&options.binding_name)
            .subaccount(&options.subaccount)
            .build()
            .map_err(|source| ServiceError::Build { operation, source })
    }
}

#[cfg(test)]
#[path = "bindings_tests.rs"]
mod tests;
