//! `qd2 deploy`: install or upgrade every component named in a spec.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy::{DeployOptions, DeployOutcome, deploy};
use crate::commands::{SpecArgs, checked_option, installer_status, resolve_kubeconfig};
use crate::output::TerminalReporter;

/// Arguments for the deploy command.
#[derive(Args, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    pub spec: SpecArgs,

    /// Cluster credentials passed to Helm as KUBECONFIG
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Alias to register the chart repository under
    #[arg(long, value_name = "ALIAS")]
    pub repo_alias: Option<String>,

    /// Render and validate releases without installing them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the merged values of each release before installing it
    #[arg(long)]
    pub show_values: bool,
}

/// Run `qd2 deploy`.
///
/// # Errors
///
/// Returns an error if the spec or options are invalid, or if Helm cannot
/// be run or cannot register the chart repository.
pub async fn run(app: &AppContext, args: &DeployArgs) -> Result<ExitCode> {
    let repo_alias = checked_option(args.repo_alias.as_deref(), "--repo-alias")?
        .unwrap_or(&app.config.defaults.repo_alias);
    let loaded = args.spec.load(&app.config)?;
    let kubeconfig = resolve_kubeconfig(args.kubeconfig.as_deref(), &app.config)?;

    let gateway = app.helm(kubeconfig.as_deref());
    let reporter = TerminalReporter::new(&app.output);
    let outcome = deploy(
        &gateway,
        &reporter,
        &loaded.spec,
        DeployOptions {
            namespace: &loaded.namespace,
            repo_alias,
            dry_run: args.dry_run,
            show_values: args.show_values,
        },
    )
    .await?;

    match outcome {
        DeployOutcome::Completed { releases } => {
            let verb = if args.dry_run { "simulated" } else { "deployed" };
            app.output.success(&format!(
                "{} release(s) {verb} in namespace {}",
                releases.len(),
                loaded.namespace
            ));
            Ok(ExitCode::SUCCESS)
        }
        DeployOutcome::Failed { release, code, .. } => {
            app.output.error(&format!(
                "deploying {release} failed with exit code {code}; later components were not deployed"
            ));
            Ok(ExitCode::from(installer_status(code)))
        }
    }
}
