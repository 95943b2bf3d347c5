//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs` or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ── Field errors ──────────────────────────────────────────────────────────────

/// One validation failure, addressed by its field path in the deploy spec
/// (e.g. `qudittoSetup.qnodes[1].name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

fn bullet_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Spec errors ───────────────────────────────────────────────────────────────

/// Input and validation failures. Every variant maps to exit code 2 and is
/// raised before any installer call is made.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse deploy spec: {0}")]
    Malformed(String),

    #[error("Spec validation error:\n{}", bullet_list(.0))]
    Invalid(Vec<FieldError>),

    #[error("Invalid option {0}")]
    InvalidOption(FieldError),

    #[error("Invalid configuration in {}:\n{}", path.display(), bullet_list(errors))]
    InvalidConfig {
        path: PathBuf,
        errors: Vec<FieldError>,
    },

    #[error("kubeconfig not found: {}", .0.display())]
    KubeconfigNotFound(PathBuf),
}

// ── Installer errors ──────────────────────────────────────────────────────────

/// The installer ran but reported failure. The core does not interpret why.
#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("{operation} failed with exit code {code}")]
    Failed { operation: String, code: i32 },
}

impl InstallerError {
    /// The installer's own result code.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Failed { code, .. } => *code,
        }
    }
}
