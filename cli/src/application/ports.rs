//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use serde_yaml::Mapping;

use crate::domain::Qd2Config;

/// Exit code reported by the installer; `0` means success.
pub type ResultCode = i32;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Parameters for one upgrade-or-install call.
#[derive(Debug, Clone, Copy)]
pub struct InstallRequest<'a> {
    /// Release name (`qcontroller`, `qorchestrator` or a node name).
    pub release: &'a str,
    /// `<alias>/<chart>`.
    pub chart_ref: &'a str,
    pub namespace: &'a str,
    pub version: Option<&'a str>,
    /// Flattened `--set` expressions.
    pub set_values: &'a [String],
    pub dry_run: bool,
}

/// Parameters for one uninstall call.
#[derive(Debug, Clone, Copy)]
pub struct UninstallRequest<'a> {
    pub release: &'a str,
    pub namespace: &'a str,
    /// Block until the release's resources are gone.
    pub wait: bool,
    /// Keep release history so the name can be inspected or rolled back.
    pub keep_history: bool,
    /// Report the call without making it; always succeeds.
    pub dry_run: bool,
}

// ── Installer Port ────────────────────────────────────────────────────────────

/// The slice of the package manager the deploy pipeline needs.
///
/// `Err` means the installer could not be run at all. A completed run that
/// failed is reported through its non-zero [`ResultCode`].
#[allow(async_fn_in_trait)]
pub trait InstallerGateway {
    /// Register (or refresh) the chart repository under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::InstallerError`] when the installer exits
    /// non-zero.
    async fn register_source(&self, alias: &str, url: &str) -> Result<()>;
    /// Upgrade the release, installing it first if it does not exist.
    async fn install_or_upgrade(&self, request: &InstallRequest<'_>) -> Result<ResultCode>;
    /// Names of the releases currently present in `namespace`.
    async fn list_installed(&self, namespace: &str) -> Result<HashSet<String>>;
    /// Remove a release.
    async fn uninstall(&self, request: &UninstallRequest<'_>) -> Result<ResultCode>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<std::process::ExitStatus>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a neutral informational line.
    fn info(&self, message: &str);
    /// Show the effective values computed for a release.
    fn values(&self, release: &str, values: &Mapping);
}

// ── Confirmation Port ─────────────────────────────────────────────────────────

/// Asks the operator before anything destructive happens.
pub trait Confirmer {
    /// Returns `true` only on an explicit yes.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be shown.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading the tool configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<Qd2Config>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
