//! Application service: deploy use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::Result;
use qd2_common::QudittoDeploySpec;

use crate::application::ports::{InstallRequest, InstallerGateway, ProgressReporter, ResultCode};
use crate::domain::helm_set::flatten_to_set_expressions;
use crate::domain::plan::{Slot, deployment_sequence};
use crate::domain::spec::{Purpose, ensure_valid};
use crate::domain::values::component_values;

/// Options for [`deploy`].
#[derive(Debug, Clone, Copy)]
pub struct DeployOptions<'a> {
    /// Resolved target namespace.
    pub namespace: &'a str,
    /// Alias the chart repository is registered under.
    pub repo_alias: &'a str,
    /// Ask the installer for a simulated run.
    pub dry_run: bool,
    /// Report each release's merged values before installing it.
    pub show_values: bool,
}

/// Outcome of the deploy use-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Every present component was installed or upgraded.
    Completed { releases: Vec<String> },
    /// The installer failed on `release`; later components were not touched.
    Failed {
        release: String,
        code: ResultCode,
        releases: Vec<String>,
    },
}

impl DeployOutcome {
    /// Result code for the whole run.
    #[must_use]
    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::Completed { .. } => 0,
            Self::Failed { code, .. } => *code,
        }
    }
}

/// Validate the spec, register the chart source, then install each present
/// component in sequence, stopping at the first failure.
///
/// # Errors
///
/// Returns [`crate::domain::SpecError`] before any installer call when the
/// spec is invalid, or the gateway's error when the installer cannot run or
/// the source cannot be registered.
pub async fn deploy(
    gateway: &impl InstallerGateway,
    reporter: &impl ProgressReporter,
    spec: &QudittoDeploySpec,
    opts: DeployOptions<'_>,
) -> Result<DeployOutcome> {
    ensure_valid(spec, Purpose::Deploy)?;

    reporter.step(&format!(
        "registering chart source '{}' ({})",
        opts.repo_alias, spec.charts.repo
    ));
    gateway
        .register_source(opts.repo_alias, &spec.charts.repo)
        .await?;

    let mut releases = Vec::new();
    for slot in deployment_sequence(spec) {
        let component = match slot {
            Slot::Present(c) => c,
            Slot::Absent(section) => {
                reporter.info(&format!("{section}: not specified"));
                continue;
            }
        };

        let values = component_values(&component);
        if opts.show_values {
            reporter.values(component.release, &values);
        }
        let set_values = flatten_to_set_expressions(&values);
        let chart_ref = component.chart_ref(opts.repo_alias);
        tracing::debug!(
            release = component.release,
            chart = %chart_ref,
            params = set_values.len(),
            "installing component"
        );

        reporter.step(&format!(
            "deploying {} ({chart_ref}) on node {}",
            component.release, component.nodek8s
        ));
        let code = gateway
            .install_or_upgrade(&InstallRequest {
                release: component.release,
                chart_ref: &chart_ref,
                namespace: opts.namespace,
                version: component.version,
                set_values: &set_values,
                dry_run: opts.dry_run,
            })
            .await?;

        if code != 0 {
            tracing::warn!(release = component.release, code, "install failed");
            return Ok(DeployOutcome::Failed {
                release: component.release.to_string(),
                code,
                releases,
            });
        }
        reporter.success(&format!("{} deployed", component.release));
        releases.push(component.release.to_string());
    }

    Ok(DeployOutcome::Completed { releases })
}
