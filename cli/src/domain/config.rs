//! Domain types and validators for qd2 tool configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::FieldError;
use crate::domain::identifier::Identifier;
use crate::domain::plan::{DEFAULT_NAMESPACE, DEFAULT_REPO_ALIAS};

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.qd2/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Qd2Config {
    /// Fallbacks for values the command line and the spec leave unset.
    pub defaults: DefaultsConfig,
    /// Installer settings.
    pub helm: HelmConfig,
}

/// Fallback values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DefaultsConfig {
    /// Namespace used when neither `--namespace` nor the spec sets one.
    pub namespace: String,
    /// Alias the chart repository is registered under.
    pub repo_alias: String,
    /// Cluster credentials used when `--kubeconfig` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            repo_alias: DEFAULT_REPO_ALIAS.to_string(),
            kubeconfig: None,
        }
    }
}

/// Helm executable settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HelmConfig {
    /// Program name or path of the Helm binary.
    pub binary: String,
    /// Upper bound for `helm list`, in seconds.
    pub query_timeout_secs: u64,
}

impl Default for HelmConfig {
    fn default() -> Self {
        Self {
            binary: "helm".to_string(),
            query_timeout_secs: 30,
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

impl Qd2Config {
    /// Check configured values with the same rules as the deploy spec.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Err(e) = Identifier::parse(&self.defaults.namespace, "defaults.namespace") {
            errors.push(e);
        }
        if let Err(e) = Identifier::parse(&self.defaults.repo_alias, "defaults.repoAlias") {
            errors.push(e);
        }
        if self.helm.binary.trim().is_empty() {
            errors.push(FieldError::new("helm.binary", "must not be empty"));
        }
        if self.helm.query_timeout_secs == 0 {
            errors.push(FieldError::new(
                "helm.queryTimeoutSecs",
                "must be greater than zero",
            ));
        }
        errors
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
