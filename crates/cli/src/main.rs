// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! btpctl: create, read and delete SAP BTP service instances and bindings
//! through the `btp` command-line tool.

mod commands;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use commands::binding::BindingArgs;
use commands::instance::InstanceArgs;
use config::{Config, ConnectionArgs, PollingArgs, Settings};
use exit_error::{ExitError, FAILURE};
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "btpctl",
    version,
    about = "Service instance and binding lifecycles on SAP BTP",
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    /// Config file (default: <config dir>/btpctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage service instances
    Instance(InstanceArgs),
    /// Manage service bindings
    Binding(BindingArgs),
    /// Classify captured `btp` error output (reads stdin without FILE)
    Classify {
        /// File holding the captured output
        file: Option<PathBuf>,
    },
}

fn settings(
    connection: &ConnectionArgs,
    polling: Option<&PollingArgs>,
    config: Option<&Path>,
) -> Result<Settings> {
    let config = Config::load(config)?;
    let defaults = PollingArgs::default();
    Ok(Settings::resolve(connection, polling.unwrap_or(&defaults), &config))
}

async fn run(cli: Cli) -> Result<()> {
    let _guard = logging::init(cli.log_file.as_deref())?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "btpctl starting");

    match cli.command {
        Commands::Instance(args) => {
            let settings =
                settings(&cli.connection, args.command.polling(), cli.config.as_deref())?;
            commands::instance::handle(args.command, &settings, cli.output).await
        }
        Commands::Binding(args) => {
            let settings =
                settings(&cli.connection, args.command.polling(), cli.config.as_deref())?;
            commands::binding::handle(args.command, &settings, cli.output).await
        }
        Commands::Classify { file } => commands::classify::handle(file, cli.output),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        let code = err.downcast_ref::<ExitError>().map_or(FAILURE, |e| e.code);
        std::process::exit(code);
    }
}
