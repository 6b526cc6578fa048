// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service instance command handlers

use anyhow::Result;
use btp_core::{CreateInstanceOptions, DeleteInstanceOptions, GetInstanceOptions};
use clap::{Args, Subcommand};

use super::{client, fail};
use crate::config::{PollingArgs, Settings};
use crate::output::{print_deleted, print_instance, OutputFormat};

#[derive(Args)]
pub struct InstanceArgs {
    #[command(subcommand)]
    pub command: InstanceCommand,
}

#[derive(Subcommand)]
pub enum InstanceCommand {
    /// Create a service instance and wait until it is ready
    Create {
        /// Instance name
        name: String,
        /// Service plan name
        #[arg(long)]
        plan: String,
        /// Service offering name
        #[arg(long)]
        offering: String,
        /// Provisioning parameters (JSON or path to a JSON file)
        #[arg(long)]
        parameters: Option<String>,
        #[command(flatten)]
        polling: PollingArgs,
    },
    /// Show a service instance
    Get {
        /// Instance name
        name: String,
    },
    /// Delete a service instance and wait until it is gone
    Delete {
        /// Instance name
        name: String,
        #[command(flatten)]
        polling: PollingArgs,
    },
}

impl InstanceCommand {
    pub fn polling(&self) -> Option<&PollingArgs> {
        match self {
            Self::Create { polling, .. } | Self::Delete { polling, .. } => Some(polling),
            Self::Get { .. } => None,
        }
    }
}

pub async fn handle(command: InstanceCommand, settings: &Settings, format: OutputFormat) -> Result<()> {
    let client = client(settings, format).await?;

    match command {
        InstanceCommand::Create { name, plan, offering, parameters, .. } => {
            let options = CreateInstanceOptions {
                login: settings.login.clone(),
                subaccount: settings.subaccount.clone(),
                instance_name: name,
                plan_name: plan,
                offering_name: offering,
                parameters,
                polling: settings.polling,
            };
            let line = client.create_service_instance(&options).await.map_err(|e| fail(format, e))?;
            print_instance(format, &line)?;
        }
        InstanceCommand::Get { name } => {
            let options = GetInstanceOptions {
                login: settings.login.clone(),
                subaccount: settings.subaccount.clone(),
                instance_name: name,
            };
            let line = client.get_service_instance(&options).await.map_err(|e| fail(format, e))?;
            print_instance(format, &line)?;
        }
        InstanceCommand::Delete { name, .. } => {
            let options = DeleteInstanceOptions {
                login: settings.login.clone(),
                subaccount: settings.subaccount.clone(),
                instance_name: name.clone(),
                polling: settings.polling,
            };
            client.delete_service_instance(&options).await.map_err(|e| fail(format, e))?;
            print_deleted(format, "service instance", &name)?;
        }
    }
    Ok(())
}
