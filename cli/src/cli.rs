//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Deploy Quditto components onto an existing Kubernetes cluster with Helm
#[derive(Parser, Debug)]
#[command(
    name = "qd2",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Enable debug logging (overrides QD2_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install or upgrade the components of a deploy spec
    Deploy(commands::deploy::DeployArgs),

    /// Uninstall the components of a deploy spec
    Teardown(commands::teardown::TeardownArgs),

    /// Validate a deploy spec and show the deploy plan
    Validate(commands::validate::ValidateArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable or the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags { no_color, quiet },
        })?;

        match command {
            Command::Deploy(args) => commands::deploy::run(&app, &args).await,
            Command::Teardown(args) => commands::teardown::run(&app, &args).await,
            Command::Validate(args) => commands::validate::run(&app, &args),
            Command::Config(cmd) => Ok(commands::config::run(&app, &cmd)),
        }
    }
}
