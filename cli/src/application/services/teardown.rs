//! Application service: teardown use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::Result;
use qd2_common::QudittoDeploySpec;

use crate::application::ports::{
    Confirmer, InstallerGateway, ProgressReporter, ResultCode, UninstallRequest,
};
use crate::domain::plan::teardown_targets;
use crate::domain::spec::{Purpose, ensure_valid};

/// Options for [`teardown`].
#[derive(Debug, Clone, Copy)]
pub struct TeardownOptions<'a> {
    /// Resolved target namespace.
    pub namespace: &'a str,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
    /// Report uninstall calls without making them.
    pub dry_run: bool,
    /// Keep release history after uninstall.
    pub keep_history: bool,
}

/// Code recorded for a release whose uninstall could not be run at all.
pub const UNRUNNABLE_CODE: ResultCode = 1;

/// Installed state of one teardown target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStatus {
    pub release: String,
    pub installed: bool,
}

/// A release whose uninstall returned non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRelease {
    pub release: String,
    pub code: ResultCode,
}

/// Outcome of the teardown use-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeardownOutcome {
    /// The spec names no components.
    NothingToDo,
    /// The operator declined at the prompt; nothing was changed.
    Declined,
    /// Every target was attempted.
    Completed {
        removed: Vec<String>,
        skipped: Vec<String>,
        failed: Vec<FailedRelease>,
    },
}

impl TeardownOutcome {
    /// The worst (highest) failure code, or `0` when nothing failed.
    #[must_use]
    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::Completed { failed, .. } => failed.iter().map(|f| f.code).max().unwrap_or(0),
            Self::NothingToDo | Self::Declined => 0,
        }
    }
}

/// Uninstall every release the spec names.
///
/// Releases that are not installed are skipped with a warning (except in a
/// dry run, where the call is still reported). A failing uninstall does not
/// stop the remaining ones, and neither does one that cannot be run: it is
/// recorded as failed with [`UNRUNNABLE_CODE`].
///
/// # Errors
///
/// Returns [`crate::domain::SpecError`] before any installer call when the
/// spec is invalid, or the gateway's error when installed releases cannot be
/// listed.
pub async fn teardown(
    gateway: &impl InstallerGateway,
    reporter: &impl ProgressReporter,
    confirmer: &impl Confirmer,
    spec: &QudittoDeploySpec,
    opts: TeardownOptions<'_>,
) -> Result<TeardownOutcome> {
    ensure_valid(spec, Purpose::Teardown)?;

    let targets = teardown_targets(spec);
    if targets.is_empty() {
        reporter.info("Nothing to do: the spec names no components.");
        return Ok(TeardownOutcome::NothingToDo);
    }

    let installed = gateway.list_installed(opts.namespace).await?;
    let plan: Vec<TargetStatus> = targets
        .into_iter()
        .map(|release| TargetStatus {
            installed: installed.contains(&release),
            release,
        })
        .collect();

    reporter.info(&format!("Teardown plan (namespace: {})", opts.namespace));
    for target in &plan {
        let state = if target.installed {
            "installed"
        } else {
            "not installed"
        };
        reporter.info(&format!("  {:<16} {state}", target.release));
    }

    if !opts.assume_yes && !confirmer.confirm("Uninstall these releases?")? {
        return Ok(TeardownOutcome::Declined);
    }

    let mut removed = Vec::new();
    let mut skipped = Vec::new();
    let mut failed = Vec::new();
    for target in plan {
        if !target.installed && !opts.dry_run {
            tracing::warn!(release = %target.release, "release not installed, skipping");
            reporter.warn(&format!("{} is not installed, skipping", target.release));
            skipped.push(target.release);
            continue;
        }

        reporter.step(&format!("uninstalling {}", target.release));
        let result = gateway
            .uninstall(&UninstallRequest {
                release: &target.release,
                namespace: opts.namespace,
                wait: true,
                keep_history: opts.keep_history,
                dry_run: opts.dry_run,
            })
            .await;

        match result {
            Ok(0) => {
                reporter.success(&format!("{} removed", target.release));
                removed.push(target.release);
            }
            Ok(code) => {
                tracing::warn!(release = %target.release, code, "uninstall failed");
                reporter.warn(&format!(
                    "uninstalling {} failed with exit code {code}",
                    target.release
                ));
                failed.push(FailedRelease {
                    release: target.release,
                    code,
                });
            }
            Err(e) => {
                tracing::warn!(
                    release = %target.release,
                    error = %format!("{e:#}"),
                    "uninstall could not run"
                );
                reporter.warn(&format!(
                    "uninstalling {} could not run: {e:#}",
                    target.release
                ));
                failed.push(FailedRelease {
                    release: target.release,
                    code: UNRUNNABLE_CODE,
                });
            }
        }
    }

    Ok(TeardownOutcome::Completed {
        removed,
        skipped,
        failed,
    })
}
