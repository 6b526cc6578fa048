// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service instance operations.

use crate::checks::{GoneCheck, ReadyCheck, Resource};
use crate::client::{BtpClient, SessionLogin, INSTANCE_TARGET};
use crate::error::{Operation, ServiceError};
use btp_core::{to_json, CreateInstanceOptions, DeleteInstanceOptions, GetInstanceOptions};
use btp_exec::{Executor, RunSyncOptions};
use tracing::Instrument;

impl<E: Executor> BtpClient<E> {
    /// Create an instance and wait until it is ready. Returns the instance
    /// record as a single JSON line.
    pub async fn create_service_instance(
        &self,
        options: &CreateInstanceOptions,
    ) -> Result<String, ServiceError> {
        let operation = Operation::CreateInstance;
        options.validate().map_err(|source| ServiceError::MissingParameters { operation, source })?;

        let span = tracing::info_span!(
            "btp.create_instance",
            subaccount = %options.subaccount,
            name = %options.instance_name,
            plan = %options.plan_name,
            offering = %options.offering_name,
        );
        self.session(&options.login, self.create_instance_inner(options)).instrument(span).await
    }

    async fn create_instance_inner(
        &self,
        options: &CreateInstanceOptions,
    ) -> Result<String, ServiceError> {
        let operation = Operation::CreateInstance;
        let start = self
            .command()
            .with_action("create")
            .with_target(INSTANCE_TARGET)
            .name(&options.instance_name)
            .subaccount(&options.subaccount)
            .plan_name(&options.plan_name)
            .offering_name(&options.offering_name);
        let start = match &options.parameters {
            Some(parameters) => start.parameters(parameters),
            None => start,
        };
        let start = start.build().map_err(|source| ServiceError::Build { operation, source })?;

        let get = self.get_instance_argv(&options.get(), operation)?;
        let run = RunSyncOptions::new(
            start,
            ReadyCheck::new(self.clone(), get, Resource::Instance),
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

    /// Read an instance. Returns the record as a single JSON line.
    pub async fn get_service_instance(
        &self,
        options: &GetInstanceOptions,
    ) -> Result<String, ServiceError> {
        let operation = Operation::GetInstance;
        options.validate().map_err(|source| ServiceError::MissingParameters { operation, source })?;

        let span = tracing::info_span!(
            "btp.get_instance",
            subaccount = %options.subaccount,
            name = %options.instance_name,
        );
        self.session(&options.login, self.get_instance_inner(options)).instrument(span).await
    }

    async fn get_instance_inner(&self, options: &GetInstanceOptions) -> Result<String, ServiceError> {
        let operation = Operation::GetInstance;
        let argv = self.get_instance_argv(options, operation)?;
        self.executor.run(&argv).await.map_err(|source| self.exec_error(operation, source))?;
        to_json(&self.executor.stdout_snapshot())
            .map_err(|source| ServiceError::Payload { operation, source })
    }

    /// Delete an instance and wait until reading it reports not-found.
    pub async fn delete_service_instance(
        &self,
        options: &DeleteInstanceOptions,
    ) -> Result<(), ServiceError> {
        let operation = Operation::DeleteInstance;
        options.validate().map_err(|source| ServiceError::MissingParameters { operation, source })?;

        let span = tracing::info_span!(
            "btp.delete_instance",
            subaccount = %options.subaccount,
            name = %options.instance_name,
        );
        self.session(&options.login, self.delete_instance_inner(options)).instrument(span).await
    }

    async fn delete_instance_inner(&self, options: &DeleteInstanceOptions) -> Result<(), ServiceError> {
        let operation = Operation::DeleteInstance;
        let start = self
            .command()
            .with_action("delete")
            .with_target(INSTANCE_TARGET)
            .name(&options.instance_name)
            .subaccount(&options.subaccount)
            .confirm()
            .build()
            .map_err(|source| ServiceError::Build { operation, source })?;

        let get = self.get_instance_argv(&options.get(), operation)?;
        let run = RunSyncOptions::new(
            start,
            GoneCheck::new(self.clone(), get, Resource::Instance),
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

    fn get_instance_argv(
        &self,
        options: &GetInstanceOptions,
        operation: Operation,
    ) -> Result<Vec<String>, ServiceError> {
        self.command()
            .with_action("get")
            .with_target(INSTANCE_TARGET)
            .name(&options.instance_name)
            .subaccount(&options.subaccount)
            .build()
            .map_err(|source| ServiceError::Build { operation, source })
    }
}

#[cfg(test)]
#[path = "instances_tests.rs"]
mod tests;
