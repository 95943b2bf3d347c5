//! `qd2 teardown`: uninstall every release named in a spec.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::teardown::{TeardownOptions, TeardownOutcome, teardown};
use crate::commands::{SpecArgs, installer_status, resolve_kubeconfig};
use crate::output::TerminalReporter;

/// Arguments for the teardown command.
#[derive(Args, Debug)]
pub struct TeardownArgs {
    #[command(flatten)]
    pub spec: SpecArgs,

    /// Cluster credentials passed to Helm as KUBECONFIG
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print the uninstall commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Keep release history after uninstalling
    #[arg(long)]
    pub keep_history: bool,
}

/// Run `qd2 teardown`.
///
/// # Errors
///
/// Returns an error if the spec or options are invalid, or if Helm cannot
/// be run or cannot list the namespace's releases.
pub async fn run(app: &AppContext, args: &TeardownArgs) -> Result<ExitCode> {
    let loaded = args.spec.load(&app.config)?;
    let kubeconfig = resolve_kubeconfig(args.kubeconfig.as_deref(), &app.config)?;

    let gateway = app.helm(kubeconfig.as_deref());
    let reporter = TerminalReporter::new(&app.output);
    let outcome = teardown(
        &gateway,
        &reporter,
        app,
        &loaded.spec,
        TeardownOptions {
            namespace: &loaded.namespace,
            assume_yes: args.yes,
            dry_run: args.dry_run,
            keep_history: args.keep_history,
        },
    )
    .await?;

    let code = outcome.result_code();
    match outcome {
        TeardownOutcome::NothingToDo => {}
        TeardownOutcome::Declined => app.output.info("Cancelled."),
        TeardownOutcome::Completed {
            removed,
            skipped,
            failed,
        } => {
            let summary = format!(
                "{} removed, {} skipped, {} failed",
                removed.len(),
                skipped.len(),
                failed.len()
            );
            if failed.is_empty() {
                app.output.success(&summary);
            } else {
                let names: Vec<&str> = failed.iter().map(|f| f.release.as_str()).collect();
                app.output
                    .error(&format!("{summary} ({})", names.join(", ")));
            }
        }
    }

    if code == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(installer_status(code)))
    }
}
