// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service binding command handlers

use anyhow::Result;
use btp_core::{CreateBindingOptions, DeleteBindingOptions, GetBindingOptions};
use clap::{Args, Subcommand};

use super::{client, fail};
use crate::config::{PollingArgs, Settings};
use crate::output::{print_binding, print_deleted, OutputFormat};

#[derive(Args)]
pub struct BindingArgs {
    #[command(subcommand)]
    pub command: BindingCommand,
}

#[derive(Subcommand)]
pub enum BindingCommand {
    /// Bind to a service instance and wait until credentials are ready
    Create {
        /// Binding name
        name: String,
        /// Name of the instance to bind to
        #[arg(long)]
        instance: String,
        /// Binding parameters (JSON or path to a JSON file)
        #[arg(long)]
        parameters: Option<String>,
        #[command(flatten)]
        polling: PollingArgs,
    },
    /// Show a service binding
    Get {
        /// Binding name
        name: String,
    },
    /// Delete a service binding and wait until it is gone
    Delete {
        /// Binding name
        name: String,
        #[command(flatten)]
        polling: PollingArgs,
    },
}

impl BindingCommand {
    pub fn polling(&self) -> Option<&PollingArgs> {
        match self {
            Self::Create { polling, .. } | Self::Delete { polling, .. } => Some(polling),
            Self::Get { .. } => None,
        }
    }
}

pub async fn handle(command: BindingCommand, settings: &Settings, format: OutputFormat) -> Result<()> {
    let client = client(settings, format).await?;

    match command {
        BindingCommand::Create { name, instance, parameters, .. } => {
            let options = CreateBindingOptions {
                login: settings.login.clone(),
                subaccount: settings.subaccount.clone(),
                binding_name: name,
                service_instance_name: instance,
                parameters,
                polling: settings.polling,
            };
            let line = client.create_service_binding(&options).await.map_err(|e| fail(format, e))?;
            print_binding(format, &line)?;
        }
        BindingCommand::Get { name } => {
            let options = GetBindingOptions {
                login: settings.login.clone(),
                subaccount: settings.subaccount.clone(),
                binding_name: name,
            };
            let line = client.get_service_binding(&options).await.map_err(|e| fail(format, e))?;
            print_binding(format, &line)?;
        }
        BindingCommand::Delete { name, .. } => {
            let options = DeleteBindingOptions {
                login: settings.login.clone(),
                subaccount: settings.subaccount.clone(),
                binding_name: name.clone(),
                polling: settings.polling,
            };
            client.delete_service_binding(&options).await.map_err(|e| fail(format, e))?;
            print_deleted(format, "service binding", &name)?;
        }
    }
    Ok(())
}
