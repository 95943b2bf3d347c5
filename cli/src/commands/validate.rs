//! `qd2 validate`: check a spec and show what a deploy would do.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::{SpecArgs, checked_option};
use crate::domain::plan::{deployment_sequence, teardown_targets};
use crate::domain::spec::{Purpose, ensure_valid};
use crate::output::HumanRenderer;
use crate::output::human::PlanView;

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub spec: SpecArgs,

    /// Alias the chart repository would be registered under
    #[arg(long, value_name = "ALIAS")]
    pub repo_alias: Option<String>,

    /// Validate for teardown (no controller required) and list its targets
    #[arg(long)]
    pub teardown: bool,
}

/// Run `qd2 validate`. Never contacts Helm.
///
/// # Errors
///
/// Returns an error if the spec or options are invalid.
pub fn run(app: &AppContext, args: &ValidateArgs) -> Result<ExitCode> {
    let repo_alias = checked_option(args.repo_alias.as_deref(), "--repo-alias")?
        .unwrap_or(&app.config.defaults.repo_alias);
    let loaded = args.spec.load(&app.config)?;

    if args.teardown {
        ensure_valid(&loaded.spec, Purpose::Teardown)?;
        let targets = teardown_targets(&loaded.spec);
        if targets.is_empty() {
            app.output.info("Nothing to tear down: the spec names no components.");
        } else {
            app.output
                .header(&format!("Teardown targets (namespace: {})", loaded.namespace));
            for release in &targets {
                app.output.kv("release", release);
            }
        }
    } else {
        ensure_valid(&loaded.spec, Purpose::Deploy)?;
        let slots = deployment_sequence(&loaded.spec);
        HumanRenderer::new(&app.output).render_plan(&PlanView {
            namespace: &loaded.namespace,
            repo_alias,
            repo_url: &loaded.spec.charts.repo,
            slots: &slots,
        });
    }

    app.output
        .success(&format!("{} is valid", args.spec.file.display()));
    Ok(ExitCode::SUCCESS)
}
